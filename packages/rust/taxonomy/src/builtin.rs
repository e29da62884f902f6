//! Built-in taxonomy tables.
//!
//! Declaration order is significant: every lookup iterates these tables
//! top to bottom, so it fixes the order majors enter a match result and
//! which candidate wins a fuzzy tie.

/// College name and the majors it offers.
pub(crate) const COLLEGES: &[(&str, &[&str])] = &[
    (
        "공과대학",
        &[
            "건축학부",
            "건축공학부",
            "건설환경공학과",
            "도시공학과",
            "자원환경공학과",
            "융합전자공학부",
            "전기공학전공",
            "기계공학부",
            "화학공학과",
            "신소재공학부",
            "유기나노공학과",
            "에너지공학과",
            "원자력공학과",
            "산업공학과",
            "생명공학과",
            "미래자동차공학과",
        ],
    ),
    (
        "소프트웨어융합대학",
        &[
            "컴퓨터소프트웨어학부",
            "데이터사이언스학부",
            "정보시스템학과",
            "인공지능학과",
        ],
    ),
    (
        "자연과학대학",
        &["수학과", "물리학과", "화학과", "생명과학과"],
    ),
    (
        "인문과학대학",
        &[
            "국어국문학과",
            "중어중문학과",
            "영어영문학과",
            "독어독문학과",
            "사학과",
            "철학과",
        ],
    ),
    (
        "사회과학대학",
        &[
            "정치외교학과",
            "사회학과",
            "미디어커뮤니케이션학과",
            "관광학부",
        ],
    ),
    ("정책과학대학", &["정책학과", "행정학과"]),
    ("경영대학", &["경영학부", "파이낸스경영학과"]),
    ("경제금융대학", &["경제금융학부"]),
    ("의과대학", &["의예과", "의학과"]),
    ("간호대학", &["간호학부"]),
    (
        "사범대학",
        &[
            "교육학과",
            "교육공학과",
            "국어교육과",
            "영어교육과",
            "수학교육과",
        ],
    ),
    (
        "생활과학대학",
        &["식품영양학과", "의류학과", "실내건축디자인학과"],
    ),
    (
        "음악대학",
        &["성악과", "작곡과", "피아노과", "관현악과"],
    ),
    (
        "예술체육대학",
        &["연극영화학과", "체육학과", "스포츠산업학과", "무용학과"],
    ),
];

/// Cross-cutting categories and their majors. A category may name majors
/// no college offers.
pub(crate) const SPECIAL_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "IT계열",
        &[
            "컴퓨터소프트웨어학부",
            "데이터사이언스학부",
            "정보시스템학과",
            "인공지능학과",
            "융합전자공학부",
        ],
    ),
    (
        "S/W계열",
        &["컴퓨터소프트웨어학부", "인공지능학과", "데이터사이언스학부"],
    ),
    (
        "전기전자계열",
        &["융합전자공학부", "전기공학전공", "미래자동차공학과"],
    ),
    (
        "바이오의약계열",
        &["생명공학과", "생명과학과", "화학공학과", "의예과", "약학과"],
    ),
    (
        "디자인계열",
        &["실내건축디자인학과", "의류학과", "산업디자인학과"],
    ),
    (
        "어문계열",
        &[
            "국어국문학과",
            "중어중문학과",
            "영어영문학과",
            "독어독문학과",
        ],
    ),
];

/// Named fields of study and the colleges they cover.
pub(crate) const FIELD_GROUPS: &[(&str, &[&str])] = &[
    ("이공계열", &["공과대학", "소프트웨어융합대학", "자연과학대학"]),
    ("공학계열", &["공과대학", "소프트웨어융합대학"]),
    ("자연계열", &["자연과학대학"]),
    (
        "인문사회계열",
        &["인문과학대학", "사회과학대학", "정책과학대학"],
    ),
    ("상경계열", &["경영대학", "경제금융대학"]),
    ("의약계열", &["의과대학", "간호대학"]),
    ("교육계열", &["사범대학"]),
    ("예체능계열", &["음악대학", "예술체육대학"]),
];

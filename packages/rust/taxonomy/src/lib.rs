//! Academic taxonomy used as ground truth for major classification.
//!
//! Three read-only tables:
//! - colleges, each offering a list of majors (a major belongs to at most one college)
//! - special categories, cross-cutting groups of majors not tied to a college
//! - field groups, named sets of colleges representing a broad field of study
//!
//! The built-in tables are compiled in; [`Taxonomy::from_path`] loads a
//! replacement with the same shape from TOML. Either way the taxonomy is
//! immutable once built and safe to share across threads.

mod builtin;

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use internparse_shared::{InternParseError, Result};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A college and the majors it offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct College {
    pub name: String,
    pub majors: Vec<String>,
}

/// A cross-cutting category of majors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialCategory {
    pub name: String,
    pub majors: Vec<String>,
}

/// A named set of colleges covering one broad field of study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    pub name: String,
    pub colleges: Vec<String>,
}

/// On-disk shape of a taxonomy TOML file.
#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    #[serde(default)]
    colleges: Vec<College>,
    #[serde(default)]
    special_categories: Vec<SpecialCategory>,
    #[serde(default)]
    field_groups: Vec<FieldGroup>,
}

/// The full taxonomy plus the deduplicated pool of every known major.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    colleges: Vec<College>,
    special_categories: Vec<SpecialCategory>,
    field_groups: Vec<FieldGroup>,
    major_pool: Vec<String>,
}

static BUILTIN: LazyLock<Arc<Taxonomy>> = LazyLock::new(|| Arc::new(Taxonomy::builtin()));

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Taxonomy {
    /// Build and validate a taxonomy from explicit tables.
    ///
    /// Rejects a major listed under two colleges and a field group that
    /// names a college absent from `colleges`.
    pub fn new(
        colleges: Vec<College>,
        special_categories: Vec<SpecialCategory>,
        field_groups: Vec<FieldGroup>,
    ) -> Result<Self> {
        let mut owner: HashSet<&str> = HashSet::new();
        for college in &colleges {
            for major in &college.majors {
                if !owner.insert(major.as_str()) {
                    return Err(InternParseError::validation(format!(
                        "major '{major}' is listed under more than one college"
                    )));
                }
            }
        }

        for group in &field_groups {
            for name in &group.colleges {
                if !colleges.iter().any(|c| &c.name == name) {
                    return Err(InternParseError::validation(format!(
                        "field group '{}' names unknown college '{name}'",
                        group.name
                    )));
                }
            }
        }

        Ok(Self::assemble(colleges, special_categories, field_groups))
    }

    /// The tables compiled into the binary.
    pub fn builtin() -> Self {
        let colleges = owned_table(builtin::COLLEGES)
            .into_iter()
            .map(|(name, majors)| College { name, majors })
            .collect();
        let special_categories = owned_table(builtin::SPECIAL_CATEGORIES)
            .into_iter()
            .map(|(name, majors)| SpecialCategory { name, majors })
            .collect();
        let field_groups = owned_table(builtin::FIELD_GROUPS)
            .into_iter()
            .map(|(name, colleges)| FieldGroup { name, colleges })
            .collect();

        Self::assemble(colleges, special_categories, field_groups)
    }

    /// Process-wide built-in taxonomy, built on first use.
    pub fn global() -> &'static Taxonomy {
        &BUILTIN
    }

    /// Shared handle to the built-in taxonomy.
    pub fn shared() -> Arc<Taxonomy> {
        Arc::clone(&BUILTIN)
    }

    /// Parse and validate a taxonomy from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: TaxonomyFile = toml::from_str(content)
            .map_err(|e| InternParseError::parse(format!("invalid taxonomy TOML: {e}")))?;
        Self::new(file.colleges, file.special_categories, file.field_groups)
    }

    /// Load a taxonomy TOML file from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| InternParseError::io(path, e))?;
        let taxonomy = Self::from_toml_str(&content)?;
        debug!(
            ?path,
            colleges = taxonomy.colleges.len(),
            majors = taxonomy.major_pool.len(),
            "loaded taxonomy"
        );
        Ok(taxonomy)
    }

    fn assemble(
        colleges: Vec<College>,
        special_categories: Vec<SpecialCategory>,
        field_groups: Vec<FieldGroup>,
    ) -> Self {
        let mut major_pool: Vec<String> = Vec::new();
        let college_majors = colleges.iter().flat_map(|c| c.majors.iter());
        let category_majors = special_categories.iter().flat_map(|c| c.majors.iter());
        for major in college_majors.chain(category_majors) {
            if !major_pool.contains(major) {
                major_pool.push(major.clone());
            }
        }

        Self {
            colleges,
            special_categories,
            field_groups,
            major_pool,
        }
    }
}

fn owned_table(table: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
    table
        .iter()
        .map(|(name, items)| {
            (
                (*name).to_string(),
                items.iter().map(|s| (*s).to_string()).collect(),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

impl Taxonomy {
    pub fn colleges(&self) -> &[College] {
        &self.colleges
    }

    pub fn special_categories(&self) -> &[SpecialCategory] {
        &self.special_categories
    }

    pub fn field_groups(&self) -> &[FieldGroup] {
        &self.field_groups
    }

    /// Every major from colleges and special categories, deduplicated,
    /// college majors first, in declaration order.
    pub fn major_pool(&self) -> &[String] {
        &self.major_pool
    }

    /// Look up a college by exact name.
    pub fn college(&self, name: &str) -> Option<&College> {
        self.colleges.iter().find(|c| c.name == name)
    }
}

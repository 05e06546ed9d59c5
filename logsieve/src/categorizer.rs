use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Error categories in priority order. `Ord` follows declaration order, which
/// is also the order rules are tested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Database,
    Network,
    Application,
    #[serde(rename = "File System")]
    FileSystem,
    Security,
    Performance,
    Memory,
    Syntax,
    Configuration,
    Dependency,
    Service,
    Other,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Database,
        Category::Network,
        Category::Application,
        Category::FileSystem,
        Category::Security,
        Category::Performance,
        Category::Memory,
        Category::Syntax,
        Category::Configuration,
        Category::Dependency,
        Category::Service,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Database => "Database",
            Category::Network => "Network",
            Category::Application => "Application",
            Category::FileSystem => "File System",
            Category::Security => "Security",
            Category::Performance => "Performance",
            Category::Memory => "Memory",
            Category::Syntax => "Syntax",
            Category::Configuration => "Configuration",
            Category::Dependency => "Dependency",
            Category::Service => "Service",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Keywords overlap (timeout, connection, not found); the first matching rule wins.
static CATEGORY_RULES: Lazy<Vec<(Category, Regex)>> = Lazy::new(|| {
    let rules: [(Category, &str); 12] = [
        (Category::Database, r"database|sql|exception|timeout|connection"),
        (Category::Network, r"network|timeout|connection|unreachable|disconnected"),
        (Category::Application, r"nullpointer|illegalargument|runtime|application|app"),
        (Category::FileSystem, r"file|directory|not found|access denied|permission"),
        (Category::Security, r"security|unauthorized|authentication|authorization|forbidden|login"),
        (Category::Performance, r"performance|slow|timeout|delay|latency"),
        (Category::Memory, r"memory|outofmemory|heap|stack"),
        (Category::Syntax, r"syntax|parse|unexpected|unexpected token"),
        (Category::Configuration, r"configuration|config|setting|parameter|missing|invalid"),
        (Category::Dependency, r"dependency|library|module|package|not found"),
        (Category::Service, r"service|unavailable|down|restart|failed"),
        (Category::Other, r"(?s).*"),
    ];
    rules
        .into_iter()
        .map(|(category, pat)| (category, Regex::new(&format!("(?i){pat}")).unwrap()))
        .collect()
});

pub fn categorize(description: &str) -> Category {
    CATEGORY_RULES
        .iter()
        .find(|(_, re)| re.is_match(description))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

/// Per-category tally. Every category is present, zero included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub counts: BTreeMap<Category, usize>,
}

impl Default for CategoryCounts {
    fn default() -> Self {
        Self { counts: Category::ALL.iter().map(|c| (*c, 0)).collect() }
    }
}

impl CategoryCounts {
    pub fn add(&mut self, category: Category) {
        *self.counts.entry(category).or_insert(0) += 1;
    }

    pub fn get(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn merge(&mut self, other: &CategoryCounts) {
        for (category, count) in &other.counts {
            *self.counts.entry(*category).or_insert(0) += count;
        }
    }
}

pub fn count_categories<S: AsRef<str>>(descriptions: &[S]) -> CategoryCounts {
    let mut counts = CategoryCounts::default();
    for d in descriptions {
        counts.add(categorize(d.as_ref()));
    }
    counts
}

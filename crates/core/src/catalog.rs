//! The response catalog: every canned answer the assistant can give.
//!
//! A catalog is one global [`Scope`] plus zero or more context scopes. Each
//! scope owns a greeting, a default and any number of topic entries, together
//! with the ordered keyword [`Rule`]s that select them. Catalogs are defined in
//! TOML; the built-in one is compiled into the binary.
//!
//! Construction validates every invariant the resolver relies on, so a built
//! [`Catalog`] is read-only and resolution against it cannot fail.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::{Error, Result};

/// The catalog shipped with the binary.
const BUILTIN_CATALOG: &str = include_str!("../catalog/builtin.toml");

/// Reserved topic key for a scope's greeting entry.
pub const GREETING: &str = "greeting";
/// Reserved topic key for a scope's fallback entry.
pub const DEFAULT: &str = "default";
/// Name reported for the context-free scope.
pub const GLOBAL_SCOPE: &str = "global";

/// A topic key and the body returned for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub key: String,
    pub body: String,
}

impl CatalogEntry {
    fn new(key: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            body: body.into(),
        }
    }
}

/// Identifier of a context scope, e.g. `practice-studio`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ContextId(pub String);

impl ContextId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a rule's keywords combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The query contains at least one keyword.
    #[default]
    Any,
    /// The query contains every keyword.
    All,
}

/// What a matching rule answers with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RuleTarget {
    /// The greeting of the scope the caller is in.
    Greeting,
    /// The default of the scope the caller is in.
    Default,
    /// A named entry, looked up in the caller's scope and then globally.
    Topic(String),
}

impl From<String> for RuleTarget {
    fn from(topic: String) -> Self {
        match topic.as_str() {
            GREETING => Self::Greeting,
            DEFAULT => Self::Default,
            _ => Self::Topic(topic),
        }
    }
}

/// An ordered keyword set and the entry it selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Lowercased keywords, matched as plain substrings.
    pub keywords: Vec<String>,
    pub mode: MatchMode,
    pub target: RuleTarget,
}

impl Rule {
    /// Test the rule against an already-lowercased query.
    ///
    /// Containment ignores word boundaries: "colorful" contains "color" and
    /// "thirds" contains "hi". Callers depend on this, so it stays.
    pub fn matches(&self, normalized_query: &str) -> bool {
        match self.mode {
            MatchMode::Any => self.keywords.iter().any(|k| normalized_query.contains(k)),
            MatchMode::All => self.keywords.iter().all(|k| normalized_query.contains(k)),
        }
    }
}

/// The entries and rules of the global catalog or of one context.
#[derive(Debug, Clone)]
pub struct Scope {
    name: String,
    tags: Vec<String>,
    greeting: CatalogEntry,
    default: CatalogEntry,
    entries: BTreeMap<String, CatalogEntry>,
    rules: Vec<Rule>,
    greeting_triggers: Vec<String>,
    inherits_global_rules: bool,
}

impl Scope {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Caller-facing strings that select this scope.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn greeting(&self) -> &CatalogEntry {
        &self.greeting
    }

    pub fn default_entry(&self) -> &CatalogEntry {
        &self.default
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Lowercased keywords that make a query answer with the greeting.
    pub fn greeting_triggers(&self) -> &[String] {
        &self.greeting_triggers
    }

    pub fn inherits_global_rules(&self) -> bool {
        self.inherits_global_rules
    }

    /// Whether a keyword can produce this scope's greeting before any rule runs.
    pub fn is_greeting_eligible(&self) -> bool {
        !self.greeting_triggers.is_empty()
    }

    /// Look up an entry owned by this scope, including the reserved keys.
    pub fn entry(&self, key: &str) -> Option<&CatalogEntry> {
        match key {
            GREETING => Some(&self.greeting),
            DEFAULT => Some(&self.default),
            _ => self.entries.get(key),
        }
    }

    /// Every entry this scope owns: greeting, default, then topics by key.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        [&self.greeting, &self.default]
            .into_iter()
            .chain(self.entries.values())
    }

    fn defines(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }
}

/// The fixed mapping from (context, topic) to response body.
#[derive(Debug, Clone)]
pub struct Catalog {
    global: Scope,
    contexts: BTreeMap<ContextId, Scope>,
    tags: HashMap<String, ContextId>,
}

impl Catalog {
    /// Parse the catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Load a catalog definition from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            contexts = catalog.contexts.len(),
            "Loaded response catalog"
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog definition.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawCatalog =
            toml::from_str(content).map_err(|e| Error::Catalog(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawCatalog) -> Result<Self> {
        if !raw.global.tags.is_empty() {
            return Err(Error::Catalog("the global scope cannot declare tags".into()));
        }
        if !raw.global.greeting_triggers.is_empty() {
            return Err(Error::Catalog(
                "the global scope cannot declare greeting triggers".into(),
            ));
        }

        let global = raw.global.build(GLOBAL_SCOPE)?;
        for rule in &global.rules {
            check_target(&global, None, rule)?;
        }

        let mut contexts = BTreeMap::new();
        let mut tags = HashMap::new();
        for (id, raw_scope) in raw.contexts {
            let scope = raw_scope.build(&id)?;
            for rule in &scope.rules {
                check_target(&scope, Some(&global), rule)?;
            }

            let context = ContextId(id);
            for tag in &scope.tags {
                if let Some(existing) = tags.insert(tag.clone(), context.clone()) {
                    return Err(Error::Catalog(format!(
                        "tag '{tag}' is claimed by both '{existing}' and '{context}'"
                    )));
                }
            }
            contexts.insert(context, scope);
        }

        Ok(Self {
            global,
            contexts,
            tags,
        })
    }

    /// Map a caller-supplied tag to its context. Unknown tags map to `None`.
    pub fn context_for_tag(&self, tag: &str) -> Option<&ContextId> {
        self.tags.get(tag.trim())
    }

    /// The scope for `context`, or the global scope.
    pub fn scope(&self, context: Option<&ContextId>) -> &Scope {
        context
            .and_then(|id| self.contexts.get(id))
            .unwrap_or(&self.global)
    }

    pub fn global(&self) -> &Scope {
        &self.global
    }

    pub fn contexts(&self) -> impl Iterator<Item = (&ContextId, &Scope)> {
        self.contexts.iter()
    }

    /// Fetch a topic from the context scope, then the global scope, then the
    /// scope's default. Every scope owns a default, so this only fails for a
    /// catalog that bypassed validation.
    pub fn get(&self, context: Option<&ContextId>, topic: &str) -> Result<&CatalogEntry> {
        let scope = self.scope(context);
        let entry = scope
            .entry(topic)
            .or_else(|| self.global.entry(topic))
            .or_else(|| scope.entry(DEFAULT))
            .or_else(|| self.global.entry(DEFAULT));
        entry.ok_or_else(|| Error::NotFound {
            scope: scope.name.clone(),
            topic: topic.to_string(),
        })
    }

    /// Every entry in the catalog, global scope first.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.global
            .entries()
            .chain(self.contexts.values().flat_map(Scope::entries))
    }
}

fn check_target(scope: &Scope, global: Option<&Scope>, rule: &Rule) -> Result<()> {
    let RuleTarget::Topic(topic) = &rule.target else {
        return Ok(());
    };
    let defined = scope.defines(topic) || global.is_some_and(|g| g.defines(topic));
    if defined {
        Ok(())
    } else {
        Err(Error::NotFound {
            scope: scope.name.clone(),
            topic: topic.clone(),
        })
    }
}

// ── TOML representation ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawCatalog {
    global: RawScope,
    #[serde(default)]
    contexts: BTreeMap<String, RawScope>,
}

#[derive(Deserialize)]
struct RawScope {
    #[serde(default)]
    tags: Vec<String>,
    greeting: String,
    default: String,
    #[serde(default)]
    entries: BTreeMap<String, String>,
    #[serde(default)]
    rules: Vec<RawRule>,
    #[serde(default)]
    greeting_triggers: Vec<String>,
    #[serde(default)]
    inherits_global_rules: bool,
}

#[derive(Deserialize)]
struct RawRule {
    keywords: Vec<String>,
    #[serde(default)]
    mode: MatchMode,
    topic: String,
}

impl RawScope {
    fn build(self, name: &str) -> Result<Scope> {
        let invalid = |reason: String| Error::Catalog(format!("scope '{name}': {reason}"));

        if self.greeting.trim().is_empty() {
            return Err(invalid("greeting is empty".into()));
        }
        if self.default.trim().is_empty() {
            return Err(invalid("default is empty".into()));
        }

        let mut entries = BTreeMap::new();
        for (key, body) in self.entries {
            if key == GREETING || key == DEFAULT {
                return Err(invalid(format!("'{key}' is reserved")));
            }
            if body.trim().is_empty() {
                return Err(invalid(format!("entry '{key}' is empty")));
            }
            entries.insert(key.clone(), CatalogEntry::new(key, body));
        }

        let rules = self
            .rules
            .into_iter()
            .map(|raw| {
                let keywords = normalize_keywords(raw.keywords)
                    .map_err(|reason| invalid(format!("rule for '{}': {reason}", raw.topic)))?;
                Ok(Rule {
                    keywords,
                    mode: raw.mode,
                    target: raw.topic.into(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        // No triggers: the scope never greets on keywords.
        let greeting_triggers = if self.greeting_triggers.is_empty() {
            Vec::new()
        } else {
            normalize_keywords(self.greeting_triggers)
                .map_err(|reason| invalid(format!("greeting triggers: {reason}")))?
        };

        let mut tags: Vec<String> = self
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if tags.is_empty() {
            tags.push(name.to_string());
        }

        Ok(Scope {
            name: name.to_string(),
            tags,
            greeting: CatalogEntry::new(GREETING, self.greeting),
            default: CatalogEntry::new(DEFAULT, self.default),
            entries,
            rules,
            greeting_triggers,
            inherits_global_rules: self.inherits_global_rules,
        })
    }
}

fn normalize_keywords(keywords: Vec<String>) -> std::result::Result<Vec<String>, String> {
    if keywords.is_empty() {
        return Err("no keywords".into());
    }
    keywords
        .into_iter()
        .map(|k| {
            // An empty keyword would match every query.
            if k.trim().is_empty() {
                Err("empty keyword".to_string())
            } else {
                Ok(k.to_lowercase())
            }
        })
        .collect()
}

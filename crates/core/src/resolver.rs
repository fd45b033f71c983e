//! Keyword-driven response resolution.
//!
//! The resolver maps `(context, query)` to exactly one catalog entry:
//!
//! 1. lowercase the query (matching only, the body is returned verbatim)
//! 2. greeting-eligible context + greeting trigger → that context's greeting
//! 3. context rules, then global rules when the context inherits them;
//!    first match wins, there is no scoring
//! 4. otherwise the context default, or the global default without a context
//!
//! Resolution is a pure function of its inputs and the catalog.

use serde::Serialize;
use std::sync::Arc;

use crate::catalog::{Catalog, CatalogEntry, ContextId, GLOBAL_SCOPE, RuleTarget, Scope};
use crate::error::Result;

/// The outcome of one resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution<'a> {
    /// Context id, or `global` when no recognized context was supplied.
    pub scope: &'a str,
    /// Topic key of the selected entry.
    pub topic: &'a str,
    pub body: &'a str,
}

impl<'a> Resolution<'a> {
    fn new(scope: &'a Scope, entry: &'a CatalogEntry) -> Self {
        Self {
            scope: scope.name(),
            topic: &entry.key,
            body: &entry.body,
        }
    }
}

/// Selects catalog entries for free-text queries.
#[derive(Debug, Clone)]
pub struct Resolver {
    catalog: Arc<Catalog>,
}

impl Resolver {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// A resolver over the built-in catalog.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(Arc::new(Catalog::builtin()?)))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve a query. Unknown context tags are treated as no context.
    pub fn resolve(&self, context: Option<&str>, query: &str) -> Resolution<'_> {
        let context = context.and_then(|tag| self.catalog.context_for_tag(tag));
        let resolution = self.resolve_in(context, query);
        tracing::debug!(
            scope = resolution.scope,
            topic = resolution.topic,
            query_len = query.len(),
            "Resolved query"
        );
        resolution
    }

    /// The message a chat surface opens with for `context`.
    pub fn greeting(&self, context: Option<&str>) -> Resolution<'_> {
        let context = context.and_then(|tag| self.catalog.context_for_tag(tag));
        let scope = self.catalog.scope(context);
        Resolution::new(scope, scope.greeting())
    }

    fn resolve_in(&self, context: Option<&ContextId>, query: &str) -> Resolution<'_> {
        let normalized = query.to_lowercase();
        let global = self.catalog.global();
        let scope = self.catalog.scope(context);

        if context.is_some()
            && scope
                .greeting_triggers()
                .iter()
                .any(|trigger| normalized.contains(trigger.as_str()))
        {
            return Resolution::new(scope, scope.greeting());
        }

        // Without a context `scope` already is the global scope.
        let inherited = if context.is_some() && scope.inherits_global_rules() {
            global.rules()
        } else {
            &[]
        };

        let matched = scope
            .rules()
            .iter()
            .chain(inherited)
            .find(|rule| rule.matches(&normalized));

        let entry = match matched.map(|rule| &rule.target) {
            Some(RuleTarget::Greeting) => scope.greeting(),
            Some(RuleTarget::Default) | None => scope.default_entry(),
            // Targets are checked when the catalog is built.
            Some(RuleTarget::Topic(topic)) => scope
                .entry(topic)
                .or_else(|| global.entry(topic))
                .unwrap_or(scope.default_entry()),
        };

        Resolution::new(scope, entry)
    }
}

impl Resolution<'_> {
    pub fn is_global(&self) -> bool {
        self.scope == GLOBAL_SCOPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> Resolver {
        Resolver::builtin().unwrap()
    }

    #[test]
    fn every_result_is_a_catalog_body() {
        let resolver = resolver();
        let contexts = [
            None,
            Some("Digital Illustration Basics"),
            Some("Practice Studio"),
            Some("digital-illustration-basics"),
            Some("character-design-fundamentals"),
            Some("Unknown Course"),
        ];
        let queries = [
            "Explain blending modes",
            "I finished Unit 3, what's next?",
            "Help me with color theory",
            "How can I improve my foreground?",
            "What's the best cropping approach?",
            "Tell me about anatomy",
            "xyzzy",
            "",
        ];
        for context in contexts {
            for query in queries {
                let resolution = resolver.resolve(context, query);
                assert!(!resolution.body.is_empty());
                assert!(
                    resolver.catalog().entries().any(|e| e.body == resolution.body),
                    "{context:?} / {query:?} produced a body outside the catalog"
                );
            }
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let resolver = resolver();
        let first = resolver.resolve(Some("Practice Studio"), "crop ideas?");
        let second = resolver.resolve(Some("Practice Studio"), "crop ideas?");
        assert_eq!(first, second);
    }

    #[test]
    fn earlier_rule_wins() {
        let resolver = resolver();
        let resolution = resolver.resolve(None, "I finished blending my color study");
        assert_eq!(resolution.topic, "blending_modes");
    }

    #[test]
    fn unmatched_query_falls_back_to_defaults() {
        let resolver = resolver();
        let global = resolver.resolve(None, "xyzzy");
        assert!(global.is_global());
        assert_eq!(global.topic, "default");
        assert_eq!(global.body, resolver.catalog().global().default_entry().body);

        let course = resolver.resolve(Some("digital-illustration-basics"), "xyzzy");
        assert_eq!(course.scope, "digital-illustration-basics");
        assert_eq!(course.topic, "default");
        assert!(course.body.contains("Unit 3: Color Theory"));
    }

    #[test]
    fn empty_query_falls_back_to_default() {
        let resolver = resolver();
        assert_eq!(resolver.resolve(None, "").topic, "default");
        assert_eq!(resolver.resolve(Some("Practice Studio"), "").topic, "default");
    }

    #[test]
    fn help_in_greeting_context_returns_context_greeting() {
        let resolver = resolver();
        let studio = resolver.resolve(Some("Practice Studio"), "help");
        assert_eq!(studio.scope, "practice-studio");
        assert_eq!(studio.topic, "greeting");
        assert!(studio.body.contains("understand your feedback"));

        let dashboard = resolver.resolve(Some("Digital Illustration Basics"), "Help me with color theory");
        assert_eq!(dashboard.topic, "greeting");
        assert!(dashboard.body.contains("Are you stuck on a concept"));
    }

    #[test]
    fn help_without_context_is_not_a_greeting() {
        let resolver = resolver();
        assert_eq!(resolver.resolve(None, "help").topic, "default");
    }

    #[test]
    fn greeting_rule_uses_active_scope() {
        let resolver = resolver();
        let studio = resolver.resolve(Some("Practice Studio"), "hello there");
        assert!(studio.body.contains("understand your feedback"));

        let global = resolver.resolve(None, "hello there");
        assert_eq!(global.body, resolver.catalog().global().greeting().body);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let resolver = resolver();
        let upper = resolver.resolve(None, "BLENDING MODES");
        let lower = resolver.resolve(None, "blending modes");
        assert_eq!(upper.body, lower.body);
        assert_eq!(upper.topic, "blending_modes");
    }

    #[test]
    fn matching_ignores_word_boundaries() {
        let resolver = resolver();
        let course = Some("digital-illustration-basics");
        let colorful = resolver.resolve(course, "I love colorful art");
        let theory = resolver.resolve(course, "color theory");
        assert_eq!(colorful.topic, "color_theory");
        assert_eq!(colorful.body, theory.body);

        // "thirds" contains "hi", and the greeting rule sits above composition.
        let thirds = resolver.resolve(None, "Explain the Rule of Thirds");
        assert_eq!(thirds.topic, "greeting");
    }

    #[test]
    fn all_mode_rule_needs_both_keywords() {
        let resolver = resolver();
        let next = resolver.resolve(None, "I FINISHED the color unit");
        assert_eq!(next.topic, "color_theory");
        assert!(next.body.contains("Advanced Color Grading"));

        assert_eq!(resolver.resolve(None, "I finished unit 3").topic, "default");
    }

    #[test]
    fn course_context_does_not_inherit_global_rules() {
        let resolver = resolver();
        let resolution = resolver.resolve(Some("character-design-fundamentals"), "blending modes");
        assert_eq!(resolution.topic, "default");

        let studio = resolver.resolve(Some("Practice Studio"), "blending modes");
        assert_eq!(studio.topic, "blending_modes");
    }

    #[test]
    fn context_rules_come_before_inherited_rules() {
        let toml_str = r#"
[global]
greeting = "hi"
default = "fallback"

[global.entries]
light = "global light"

[[global.rules]]
keywords = ["light"]
topic = "light"

[contexts.studio]
greeting = "studio hi"
default = "studio fallback"
inherits_global_rules = true

[contexts.studio.entries]
glow = "studio glow"

[[contexts.studio.rules]]
keywords = ["light"]
topic = "glow"
"#;
        let resolver = Resolver::new(Arc::new(Catalog::from_toml_str(toml_str).unwrap()));
        assert_eq!(resolver.resolve(Some("studio"), "light").body, "studio glow");
        assert_eq!(resolver.resolve(None, "light").body, "global light");
    }

    #[test]
    fn course_rules_follow_declared_order() {
        let resolver = resolver();
        let course = Some("character-design-fundamentals");
        assert_eq!(resolver.resolve(course, "proportion tips").topic, "anatomy");
        assert_eq!(resolver.resolve(course, "What should I do?").topic, "next_steps");
        assert_eq!(resolver.resolve(course, "character personality").topic, "personality");

        let illustration = Some("digital-illustration-basics");
        assert_eq!(resolver.resolve(illustration, "warm or cool?").topic, "warm_cool");
        assert_eq!(resolver.resolve(illustration, "Which brush?").topic, "brushes");
    }

    #[test]
    fn unknown_context_is_treated_as_none() {
        let resolver = resolver();
        let resolution = resolver.resolve(Some("Watercolor 101"), "help");
        assert!(resolution.is_global());
        assert_eq!(resolution.topic, "default");
    }

    #[test]
    fn greeting_for_course_context() {
        let resolver = resolver();
        let greeting = resolver.greeting(Some("character-design-fundamentals"));
        assert!(greeting.body.starts_with("Hello! I'm your AI assistant"));
        assert!(resolver.greeting(None).is_global());
    }
}

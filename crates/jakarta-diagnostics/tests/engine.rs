use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use jakarta_diagnostics::{
    default_rules, CancellationToken, Cancelled, DiagnosticsEngine, EngineOptions, Rule,
    RuleError, RuleRegistry,
};
use jakarta_syntax::{lower_java, SourceUnit};
use jakarta_types::{Diagnostic, Span};
use pretty_assertions::assert_eq;

fn unit() -> SourceUnit {
    lower_java("file:///A.java", "class A {}").unwrap()
}

fn diag(message: &str) -> Diagnostic {
    Diagnostic::warning("test", "TEST", message, Span::new(0, 1))
}

struct Emits(&'static str, usize);

impl Rule for Emits {
    fn id(&self) -> &'static str {
        self.0
    }

    fn codes(&self) -> &'static [&'static str] {
        &[]
    }

    fn collect(&self, _unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        Ok((0..self.1).map(|i| diag(&format!("{}{i}", self.0))).collect())
    }
}

struct Panics;

impl Rule for Panics {
    fn id(&self) -> &'static str {
        "panics"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[]
    }

    fn collect(&self, _unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        panic!("boom")
    }
}

struct Fails;

impl Rule for Fails {
    fn id(&self) -> &'static str {
        "fails"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[]
    }

    fn collect(&self, _unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        Err(RuleError::UnexpectedShape("class without body".into()))
    }
}

struct NotApplicable(Arc<AtomicUsize>);

impl Rule for NotApplicable {
    fn id(&self) -> &'static str {
        "not-applicable"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[]
    }

    fn is_applicable(&self, _unit: &SourceUnit) -> bool {
        false
    }

    fn collect(&self, _unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(vec![diag("never")])
    }
}

struct CancelsRequest(CancellationToken);

impl Rule for CancelsRequest {
    fn id(&self) -> &'static str {
        "cancels"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[]
    }

    fn collect(&self, _unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        self.0.cancel();
        Ok(vec![diag("partial")])
    }
}

fn engine(rules: Vec<Arc<dyn Rule>>, options: EngineOptions) -> DiagnosticsEngine {
    let mut registry = RuleRegistry::new();
    for rule in rules {
        registry.register(rule).unwrap();
    }
    DiagnosticsEngine::new(Arc::new(registry), options)
}

fn messages(diags: &[Diagnostic]) -> Vec<&str> {
    diags.iter().map(|d| d.message.as_str()).collect()
}

#[test]
fn failing_and_panicking_rules_contribute_nothing() {
    let engine = engine(
        vec![
            Arc::new(Emits("a", 1)),
            Arc::new(Panics),
            Arc::new(Fails),
            Arc::new(Emits("b", 2)),
        ],
        EngineOptions::default(),
    );

    let out = engine.analyze(&unit(), &CancellationToken::new()).unwrap();
    assert_eq!(messages(&out), vec!["a0", "b0", "b1"]);
}

#[test]
fn inapplicable_rules_are_not_collected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = engine(
        vec![Arc::new(NotApplicable(calls.clone()))],
        EngineOptions::default(),
    );
    let out = engine.analyze(&unit(), &CancellationToken::new()).unwrap();
    assert!(out.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn per_rule_quota_truncates() {
    let engine = engine(
        vec![Arc::new(Emits("a", 5)), Arc::new(Emits("b", 1))],
        EngineOptions {
            max_diagnostics_per_rule: 2,
            ..EngineOptions::default()
        },
    );
    let out = engine.analyze(&unit(), &CancellationToken::new()).unwrap();
    assert_eq!(messages(&out), vec!["a0", "a1", "b0"]);
}

#[test]
fn parallel_rules_keep_rule_order() {
    let rules: Vec<Arc<dyn Rule>> = vec![
        Arc::new(Emits("a", 3)),
        Arc::new(Panics),
        Arc::new(Emits("b", 3)),
        Arc::new(Emits("c", 3)),
    ];
    let sequential = engine(rules.clone(), EngineOptions::default());
    let parallel = engine(
        rules,
        EngineOptions {
            parallel_rules: true,
            ..EngineOptions::default()
        },
    );

    let token = CancellationToken::new();
    let expected = sequential.analyze(&unit(), &token).unwrap();
    for _ in 0..8 {
        assert_eq!(parallel.analyze(&unit(), &token).unwrap(), expected);
    }
}

#[test]
fn cancelled_request_returns_cancelled() {
    let engine = engine(vec![Arc::new(Emits("a", 1))], EngineOptions::default());
    let token = CancellationToken::new();
    token.cancel();
    assert_eq!(engine.analyze(&unit(), &token), Err(Cancelled));
}

#[test]
fn cancellation_between_rules_discards_partial_results() {
    let token = CancellationToken::new();
    let engine = engine(
        vec![
            Arc::new(Emits("a", 1)),
            Arc::new(CancelsRequest(token.clone())),
            Arc::new(Emits("b", 1)),
        ],
        EngineOptions::default(),
    );
    assert_eq!(engine.analyze(&unit(), &token), Err(Cancelled));
}

#[test]
fn builtin_catalog_registers_cleanly() {
    let registry = default_rules().expect("built-in rules have unique ids and codes");
    assert_eq!(registry.len(), 25);

    let ids: HashSet<_> = registry.ids().collect();
    assert_eq!(ids.len(), registry.len());

    assert_eq!(registry.owner_of("ExtendHttpServlet"), Some("webservlet-superclass"));
    assert_eq!(registry.owner_of("RemoveMapKeyorMapKeyClass"), Some("mapkey-conflict"));
    assert_eq!(registry.owner_of("NonPublicResourceMethod"), Some("resource-method-visibility"));

    let trimmed = registry.with_disabled(&["generated-date"]);
    assert_eq!(trimmed.len(), 24);
    assert_eq!(trimmed.owner_of("InvalidDateFormat"), None);
}

/// Records the metadata target of every event.
#[derive(Clone, Default)]
struct Targets(Arc<Mutex<Vec<String>>>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Targets {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.0
            .lock()
            .unwrap()
            .push(event.metadata().target().to_string());
    }
}

#[test]
fn rule_failures_log_under_the_diagnostics_target() {
    use tracing_subscriber::layer::SubscriberExt;

    let targets = Targets::default();
    let subscriber = tracing_subscriber::registry().with(targets.clone());
    let engine = engine(
        vec![Arc::new(Fails), Arc::new(Panics)],
        EngineOptions::default(),
    );

    let unit = unit();
    tracing::subscriber::with_default(subscriber, || {
        engine.analyze(&unit, &CancellationToken::new()).unwrap();
    });

    let targets = targets.0.lock().unwrap().clone();
    assert_eq!(targets, vec!["jakarta.diagnostics", "jakarta.diagnostics"]);
}

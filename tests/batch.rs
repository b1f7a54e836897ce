mod common;

use common::{Broken, Car, Sealed, factory};
use specular::{
    ModelDescription,
    engine::{Diagnostic, DiagnosticSink, Diagnostics, ModelBatch, Severity},
};

#[test]
fn test_failures_are_reported_and_skipped() {
    let factory = factory();
    let mut diagnostics = Diagnostics::new();
    let mut descriptions: Vec<ModelDescription> = Vec::new();

    let mut batch = ModelBatch::<String>::new(&factory, &mut diagnostics).with_sink(&mut descriptions);
    assert!(batch.process::<Car>().is_some());
    assert!(batch.process::<Broken>().is_none());
    assert!(batch.process::<Sealed>().is_some());

    let summary = batch.finish();
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    let error = diagnostics.errors().next().unwrap();
    assert_eq!(error.location.as_deref(), Some("Broken::value"));

    let targets: Vec<_> = descriptions.iter().map(|d| d.target.as_str()).collect();
    assert_eq!(targets, vec!["Car", "Sealed"]);
}

#[test]
fn test_descriptions_serialize() -> anyhow::Result<()> {
    let factory = factory();
    let mut diagnostics = Diagnostics::new();
    let mut descriptions: Vec<ModelDescription> = Vec::new();

    ModelBatch::<String>::new(&factory, &mut diagnostics)
        .with_sink(&mut descriptions)
        .process::<Car>();

    let json = serde_json::to_value(&descriptions[0])?;
    assert_eq!(json["target"], "Car");
    assert_eq!(json["properties"][1]["key"], "mileage");
    assert_eq!(json["properties"][1]["attributes"][0][1], "km");
    assert_eq!(json["properties"][0]["mutable"], false);
    assert_eq!(json["factories"][0]["kind"], "PrimaryConstructor");
    assert_eq!(json["factories"][0]["primary"], true);
    assert_eq!(json["factories"][2]["parameters"][0]["linked_property"], "id");

    let decoded: ModelDescription = serde_json::from_value(json)?;
    assert_eq!(decoded, descriptions[0]);
    Ok(())
}

struct Collected(Vec<String>);

impl DiagnosticSink for Collected {
    fn report(&mut self, diagnostic: Diagnostic) {
        assert_eq!(diagnostic.severity, Severity::Error);
        self.0.push(diagnostic.to_string());
    }
}

#[test]
fn test_custom_sinks() {
    let factory = factory();
    let mut sink = Collected(Vec::new());

    let mut batch = ModelBatch::<String>::new(&factory, &mut sink);
    batch.process::<Broken>();
    batch.process::<Broken>();
    assert_eq!(batch.summary().failed, 2);
    drop(batch);

    assert_eq!(sink.0.len(), 2);
    assert!(sink.0[0].contains("Broken::value"));
}

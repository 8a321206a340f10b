//! Integration tests for label resolution and highlight matching.

use golr_response::prelude::*;

const ANNOTATION_RESPONSE: &str = include_str!("fixtures/annotation_response.json");

fn annotation_response() -> ResponseEnvelope {
    let _ = env_logger::builder().is_test(true).try_init();
    ResponseEnvelope::new(ANNOTATION_RESPONSE)
}

#[test]
fn test_scalar_label_returned_verbatim() -> Result<()> {
    let response = annotation_response();

    let label = response.label_for("MGI:MGI:98834:GO:0004672", "taxon", "NCBITaxon:9606")?;
    assert_eq!(label.as_deref(), Some("Mus musculus"));
    assert_eq!(response.cached_label_maps(), 0);
    Ok(())
}

#[test]
fn test_single_item_label_list() -> Result<()> {
    let response = annotation_response();

    let label = response.label_for(0usize, "annotation_extension_class", "CL:0000540")?;
    assert_eq!(label.as_deref(), Some("neuron"));
    assert_eq!(response.cached_label_maps(), 0);
    Ok(())
}

#[test]
fn test_closure_map_decoded_once() -> Result<()> {
    let response = annotation_response();
    let key = "MGI:MGI:98834:GO:0004672";

    let label = response.label_for(key, "isa_partof_closure", "GO:0016301")?;
    assert_eq!(label.as_deref(), Some("kinase activity"));
    assert_eq!(response.cached_label_maps(), 1);

    let label = response.label_for(0usize, "isa_partof_closure", "GO:0003674")?;
    assert_eq!(label.as_deref(), Some("molecular_function"));
    assert_eq!(response.cached_label_maps(), 1);
    Ok(())
}

#[test]
fn test_falls_through_to_list_map() -> Result<()> {
    let response = annotation_response();

    let label = response.label_for("1", "regulates_closure", "GO:0016301")?;
    assert_eq!(label.as_deref(), Some("kinase activity"));

    let label = response.label_for("1", "regulates_closure", "GO:0003674")?;
    assert_eq!(label.as_deref(), Some("molecular_function"));
    assert_eq!(response.cached_label_maps(), 2);
    Ok(())
}

#[test]
fn test_unresolved_labels() -> Result<()> {
    let response = annotation_response();

    assert_eq!(response.label_for(1usize, "has_participant", "CHEBI:15422")?, None);
    assert_eq!(response.label_for(1usize, "regulates_closure", "GO:9999999")?, None);
    assert_eq!(response.label_for(1usize, "no_such_field", "GO:0016301")?, None);
    assert_eq!(response.label_for("no_such_doc", "taxon", "NCBITaxon:9606")?, None);
    Ok(())
}

#[test]
fn test_malformed_map_is_an_error() {
    let response = annotation_response();

    let result = response.label_for("UniProtKB:Q13153", "annotation_extension_class", "CL:0000540");
    match result {
        Err(ResponseError::MalformedMap { field, .. }) => {
            assert_eq!(field, "annotation_extension_class_closure_map");
        }
        other => panic!("Expected MalformedMap, got {:?}", other),
    }
}

#[test]
fn test_highlight_by_identifier() {
    let response = annotation_response();

    let fragment = response.highlight_for(
        "MGI:MGI:98834:GO:0004672",
        "annotation_class",
        "protein kinase activity",
    );
    assert_eq!(fragment, Some("protein <em>kinase</em> activity"));

    let fragment = response.highlight_for("MGI:MGI:98834:GO:0004672", "bioentity", "Pak1");
    assert_eq!(fragment, Some("Pak1"));
}

#[test]
fn test_highlight_by_position() {
    let response = annotation_response();

    let fragment = response.highlight_for(
        2usize,
        "isa_partof_closure",
        "protein serine/threonine kinase activity",
    );
    assert_eq!(
        fragment,
        Some("protein serine/threonine <em>kinase</em> activity")
    );

    let fragment = response.highlight_for(0usize, "annotation_class", "protein kinase activity");
    assert_eq!(fragment, Some("protein <em>kinase</em> activity"));
}

#[test]
fn test_highlight_direct_key_wins() {
    let response = annotation_response();

    // "1" is both a highlighting key and a position.
    let fragment = response.highlight_for("1", "annotation_class", "kinase activity");
    assert_eq!(fragment, Some("<em>kinase</em> activity"));
}

#[test]
fn test_highlight_misses() {
    let response = annotation_response();

    assert_eq!(response.highlight_for("UniProtKB:Q13153", "isa_partof_closure", "kinase"), None);
    assert_eq!(response.highlight_for("UniProtKB:Q13153", "taxon", "NCBITaxon:9606"), None);
    assert_eq!(response.highlight_for("no_such_doc", "annotation_class", "kinase activity"), None);
    assert_eq!(response.highlight_for(9usize, "annotation_class", "kinase activity"), None);
}

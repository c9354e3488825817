//! Then step definitions
//!
//! Steps that verify outcomes and assertions.

use cucumber::{gherkin::Step, then};

use crate::world::PartialElementWorld;

fn assert_success(world: &PartialElementWorld) {
    assert!(
        world.error.is_none(),
        "Expected successful rewrite, got error: {:?}",
        world.error
    );
}

// =============================================================================
// Markup steps
// =============================================================================

#[then("the markup is:")]
fn assert_markup(world: &mut PartialElementWorld, step: &Step) {
    assert_success(world);
    let expected = step.docstring.as_deref().unwrap_or_default().trim();
    assert_eq!(world.markup.as_deref(), Some(expected));
}

#[then("nothing is rendered")]
fn assert_nothing_rendered(world: &mut PartialElementWorld) {
    assert_success(world);
    assert_eq!(world.markup.as_deref(), Some(""));
}

#[then("the error placeholder is rendered")]
fn assert_placeholder(world: &mut PartialElementWorld) {
    assert_success(world);
    assert_eq!(world.markup.as_deref(), Some("<div>ERROR</div>"));
}

// =============================================================================
// Element and attribute steps
// =============================================================================

#[then(expr = "the output element is {string}")]
fn assert_output_tag(world: &mut PartialElementWorld, tag: String) {
    assert_success(world);
    let actual = world
        .output_element()
        .and_then(|e| e.get("tag"))
        .and_then(|t| t.as_str());
    assert_eq!(actual, Some(tag.as_str()), "Output: {:?}", world.output);
}

#[then(expr = "the output has attribute {string} with value {string}")]
fn assert_attribute(world: &mut PartialElementWorld, name: String, value: String) {
    assert_success(world);
    let actual = world.output_attribute(&name).and_then(|v| v.as_str());
    assert_eq!(
        actual,
        Some(value.as_str()),
        "Attribute '{}' on output: {:?}",
        name,
        world.output
    );
}

#[then(expr = "the output has no attribute {string}")]
fn assert_no_attribute(world: &mut PartialElementWorld, name: String) {
    assert_success(world);
    assert!(
        world.output_attribute(&name).is_none(),
        "Expected no '{}' attribute, output: {:?}",
        name,
        world.output
    );
}

// =============================================================================
// Handler steps
// =============================================================================

#[then(expr = "firing {string} runs {string}")]
fn assert_fired(world: &mut PartialElementWorld, key: String, expected: String) {
    assert_success(world);
    let expected: Vec<String> = expected.split(',').map(|s| s.trim().to_string()).collect();
    let actual = world
        .fired
        .get(&key)
        .unwrap_or_else(|| panic!("No '{}' handler on output: {:?}", key, world.output));
    assert_eq!(actual, &expected);
}

// =============================================================================
// Error steps
// =============================================================================

#[then(expr = "the rewrite fails with {string}")]
fn assert_error(world: &mut PartialElementWorld, fragment: String) {
    let error = world.error.as_deref().unwrap_or_else(|| {
        panic!("Expected an error, got markup: {:?}", world.markup)
    });
    assert!(
        error.contains(&fragment),
        "Expected error containing '{}', got '{}'",
        fragment,
        error
    );
}

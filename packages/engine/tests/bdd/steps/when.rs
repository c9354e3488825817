//! When step definitions
//!
//! Steps that run the rewrite.

use cucumber::when;

use crate::world::PartialElementWorld;

#[when("the partial element is rendered")]
fn render_partial(world: &mut PartialElementWorld) {
    world.rewrite();
}

//! When steps for discovery round BDD scenarios.

use super::world::{DiscoveryWorld, run_async};
use rstest_bdd_macros::when;

#[when("a discovery round runs")]
fn a_round_runs(world: &mut DiscoveryWorld) {
    world.last_outcome = Some(run_async(world.daemon.run_round()));
}

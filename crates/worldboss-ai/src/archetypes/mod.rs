//! One module per archetype. Each exposes the hooks wired into the
//! strategy table.

pub mod butcher;
pub mod horde_queen;
pub mod ice_breaker;
pub mod pyromancer;
pub mod shadow;

use worldboss_core::catalog::get_profile;
use worldboss_core::enums::BossArchetype;

fn name(archetype: BossArchetype) -> &'static str {
    get_profile(archetype).display_name
}

pub mod phys;
pub mod resources;
pub mod ecs_setup;
pub mod outcome;
pub mod projectile;
pub mod collider;
pub mod unit;
pub mod visual;

pub use self::{
    phys::*,
    resources::*,
    ecs_setup::*,
    outcome::*,
    projectile::*,
    collider::*,
    unit::*,
    visual::*,
};

pub mod ai;
pub mod boss;
pub mod combat;
pub mod player;
pub mod projectiles;

//! data_runtime: data schemas and loaders for the dungeon simulation.
//!
//! Kept free of simulation dependencies so the sim core and any tooling can
//! depend on a stable data API. Every loader falls back to baked-in defaults
//! when the `data/config` file is absent, so a bare checkout still runs.

pub mod specs {
    pub mod archetypes;
    pub mod projectiles;
    pub mod weapons;
}
pub mod configs {
    pub mod boss;
}

pub(crate) fn data_root() -> std::path::PathBuf {
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

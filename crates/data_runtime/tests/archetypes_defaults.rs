use data_runtime::specs::archetypes::{ArchetypeSpecDb, StrategyTag};

#[test]
fn archetypes_defaults_present() {
    let db = ArchetypeSpecDb::load_default().expect("load");
    let basic = db.entries.get("basic").expect("basic");
    assert!(basic.hp > 0 && basic.attack_cooldown_s > 0.0);
    let ranged = db.entries.get("ranged").expect("ranged");
    assert_eq!(ranged.strategy, StrategyTag::Kiting);
    assert!(ranged.projectile.is_some());
    let ricochet = db.entries.get("ricochet").expect("ricochet");
    assert_eq!(ricochet.max_ricochets, Some(2));
}

use data_runtime::specs::weapons::WeaponSpecDb;

#[test]
fn weapon_defaults_match_design_values() {
    let db = WeaponSpecDb::load_default().expect("load");
    let sword = db.weapons.get("sword").expect("sword");
    assert!((sword.arc_deg - 90.0).abs() < 1e-3);
    assert!((sword.damage_mult - 1.5).abs() < 1e-3);
    // Only the mace knocks back.
    for (name, w) in &db.weapons {
        if name == "mace" {
            assert!(w.knockback > 0.0);
        } else {
            assert_eq!(w.knockback, 0.0, "{name} should not knock back");
        }
    }
}

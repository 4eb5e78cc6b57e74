//! Static CargoExport samples used across harnesses.
//!
//! The rows mirror the shapes the wiki returns for each table: every
//! requested field is present, missing values come back as `null`.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use sto_core::Category;

/// Equipment rows, including a duplicate name and a row without identity.
pub fn equipment_rows() -> Value {
    json!([
        {
            "Page": "Phaser Beam Array Mk XII",
            "name": "Phaser Beam Array Mk XII",
            "rarity": "Rare",
            "type": "Ship Weapon",
            "head1": "Stats", "subhead1": null, "text1": "Damage: 120<br>Arc: 250",
            "head2": null, "subhead2": null, "text2": null
        },
        {
            "Page": "Disruptor Beam Array Mk XII",
            "name": "Disruptor Beam Array Mk XII",
            "rarity": "Very Rare",
            "type": "Ship Weapon",
            "head1": "Stats", "subhead1": null, "text1": "Damage: 118",
            "head2": null, "subhead2": null, "text2": null
        },
        {
            "Page": "Phaser Beam Array Mk XII (duplicate)",
            "name": "Phaser Beam Array Mk XII",
            "rarity": "Common",
            "type": "Ship Weapon",
            "head1": "Stats", "subhead1": null, "text1": "Damage: 1",
            "head2": null, "subhead2": null, "text2": null
        },
        {
            "name": null,
            "rarity": "Rare",
            "type": "Ship Weapon",
            "head1": "Orphan", "subhead1": null, "text1": null
        }
    ])
}

pub fn personal_trait_rows() -> Value {
    json!([
        {
            "Page": "Trait: Astute",
            "name": "Astute",
            "chartype": "both",
            "environment": "space",
            "type": "Trait",
            "isunique": "",
            "description": "+5 Crit Chance"
        },
        {
            "Page": "Trait: Beam Barrage",
            "name": "Beam Barrage",
            "chartype": "char",
            "environment": "space",
            "type": "Trait",
            "isunique": "1",
            "description": "Beam <b>damage</b> bonus"
        }
    ])
}

pub fn starship_trait_rows() -> Value {
    json!([
        {
            "Page": "Emergency Weapon Cycle",
            "name": "Emergency Weapon Cycle",
            "short": "Faster weapons",
            "type": "Starship",
            "detailed": null,
            "obtained": "Lobi Store",
            "basic": "Emergency Power to Weapons<br>reduces cycle time"
        }
    ])
}

pub fn doff_rows() -> Value {
    json!([
        {
            "Page": "Specialization: Conn Officer",
            "doff_specialization": "Conn Officer",
            "shipdutytype": "Space",
            "department": "Tactical",
            "description": "Helm &amp; evasive <i>maneuvers</i>",
            "white": null, "green": "Minor", "blue": null,
            "purple": "Major", "violet": null, "gold": null
        },
        {
            "Page": "Specialization: Damage Control Engineer",
            "doff_specialization": "Damage Control Engineer",
            "shipdutytype": "Space",
            "department": "Engineering",
            "description": "Reduces Emergency Power recharge",
            "white": null, "green": null, "blue": null,
            "purple": null, "violet": null, "gold": null
        }
    ])
}

/// Sample rows for a known category.
pub fn rows_for(category: Category) -> Value {
    match category {
        Category::Equipment => equipment_rows(),
        Category::PersonalTrait => personal_trait_rows(),
        Category::StarshipTrait => starship_trait_rows(),
        Category::Doff => doff_rows(),
        Category::Unknown => json!([]),
    }
}

/// Write `value` as JSON to `dir/name` and return the path.
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(value).expect("serialize fixture"))
        .expect("write fixture");
    path
}

/// Seed a cache directory with every category's sample rows.
pub fn seed_cache(dir: &Path) {
    for category in Category::KNOWN {
        write_json(dir, &format!("{category}.json"), &rows_for(category));
    }
}

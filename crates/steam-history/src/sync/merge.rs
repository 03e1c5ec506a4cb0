//! Left join of player progress with title schema and global rarity

use std::collections::HashMap;

use crate::models::{GlobalPercentage, MergedAchievement, PlayerAchievement, SchemaAchievement};

/// Combine the three per-title sources into one record per player achievement.
///
/// Output order and length follow `player`. Schema and global entries are
/// matched by `apiname == name`; the first entry wins on duplicate names.
/// Unmatched schema or global entries are dropped.
pub fn merge(
    player: &[PlayerAchievement],
    schema: &[SchemaAchievement],
    global: &[GlobalPercentage],
) -> Vec<MergedAchievement> {
    let mut schema_by_name: HashMap<&str, &SchemaAchievement> = HashMap::with_capacity(schema.len());
    for entry in schema {
        schema_by_name.entry(entry.name.as_str()).or_insert(entry);
    }

    let mut percent_by_name: HashMap<&str, Option<f64>> = HashMap::with_capacity(global.len());
    for entry in global {
        percent_by_name
            .entry(entry.name.as_str())
            .or_insert(entry.percent);
    }

    player
        .iter()
        .map(|p| {
            let schema = schema_by_name.get(p.apiname.as_str()).copied();
            let global_percent = percent_by_name.get(p.apiname.as_str()).copied().flatten();
            coalesce(p, schema, global_percent)
        })
        .collect()
}

fn coalesce(
    player: &PlayerAchievement,
    schema: Option<&SchemaAchievement>,
    global_percent: Option<f64>,
) -> MergedAchievement {
    match schema {
        Some(s) => MergedAchievement {
            player: player.clone(),
            display_name: Some(s.display_name.clone()),
            description: Some(s.description.clone().unwrap_or_default()),
            icon: Some(if player.is_achieved() {
                s.icon.clone()
            } else {
                s.icongray.clone()
            }),
            hidden: Some(s.hidden),
            global_percent,
        },
        None => MergedAchievement {
            player: player.clone(),
            display_name: None,
            description: None,
            icon: None,
            hidden: None,
            global_percent,
        },
    }
}

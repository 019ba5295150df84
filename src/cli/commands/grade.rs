//! Grade add/edit/delete commands

use super::Session;
use crate::args::GradeSubcommand;
use grade_tracker::config::Config;
use grade_tracker::core::gradebook::{add_grade, delete_grade, edit_grade, find_grade};
use grade_tracker::core::models::{GradeInput, GradePatch};
use grade_tracker::info;

/// Dispatch grade subcommands
pub fn run(subcommand: GradeSubcommand, config: &Config) -> Result<(), String> {
    let mut session = Session::open_onboarded(config)?;

    match subcommand {
        GradeSubcommand::Add {
            subject,
            value,
            weight,
            label,
            year,
        } => {
            let year = session.year(year);
            let mut input = GradeInput::new(value).with_weight(weight);
            if let Some(label) = label {
                input = input.with_label(label);
            }
            let id = add_grade(&mut session.data, year, &subject, input)
                .map_err(|e| format!("✗ {e}"))?;
            session.save()?;
            info!("Added grade {id} to {subject} (year {year})");
            println!("✓ Added {value} to {subject} ({id})");
        }
        GradeSubcommand::Edit {
            grade_id,
            value,
            weight,
            label,
            year,
        } => {
            let year = session.year(year);
            let patch = GradePatch {
                value,
                weight,
                label,
            };
            edit_grade(&mut session.data, year, &grade_id, patch).map_err(|e| format!("✗ {e}"))?;
            session.save()?;
            info!("Edited grade {grade_id} (year {year})");
            if let Some((subject, grade)) = find_grade(&session.data, year, &grade_id) {
                println!(
                    "✓ Updated {subject} grade: {:.2} ×{}",
                    grade.value, grade.weight
                );
            }
        }
        GradeSubcommand::Delete { grade_id, year } => {
            let year = session.year(year);
            let removed =
                delete_grade(&mut session.data, year, &grade_id).map_err(|e| format!("✗ {e}"))?;
            session.save()?;
            info!("Deleted grade {grade_id} (year {year})");
            println!("✓ Deleted grade {:.2} ({grade_id})", removed.value);
        }
    }

    Ok(())
}

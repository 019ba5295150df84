//! Profile, year, direction and subject listing commands

use super::Session;
use grade_tracker::config::Config;
use grade_tracker::core::aggregate::has_any_grade;
use grade_tracker::core::curriculum::{subjects_for_year, year3_directions};
use grade_tracker::core::gradebook::{select_direction, set_current_year, set_student_info};
use grade_tracker::core::models::{CurriculumEntity, Division, Subject, Year};
use grade_tracker::core::report::{SubjectRow, NO_GRADE};
use grade_tracker::{info, verbose};

/// Complete (or redo) onboarding
pub fn init(config: &Config, name: &str, division: Division) -> Result<(), String> {
    let mut session = Session::open(config)?;
    set_student_info(&mut session.data, name, division).map_err(|e| format!("✗ {e}"))?;
    session.save()?;
    info!("Student profile set for {}", name.trim());
    println!("✓ Welcome, {} ({division})", name.trim());
    Ok(())
}

/// Show or switch the current year
pub fn year(config: &Config, year: Option<Year>) -> Result<(), String> {
    let mut session = Session::open_onboarded(config)?;
    match year {
        None => println!("Current year: {}", session.data.current_year),
        Some(year) => {
            set_current_year(&mut session.data, year);
            session.save()?;
            println!("✓ Current year set to {year}");
            if year == Year::Third && session.data.year3_direction.is_none() {
                println!("  Choose a direction with `gradetracker direction <ID>`.");
            }
        }
    }
    Ok(())
}

/// List directions, or select one
pub fn direction(config: &Config, id: Option<&str>) -> Result<(), String> {
    let mut session = Session::open_onboarded(config)?;
    let Some(id) = id else {
        let selected = session.data.year3_direction.as_deref();
        println!("\n=== Year 3 Directions ===\n");
        for direction in year3_directions() {
            let marker = if selected == Some(direction.id) { "*" } else { " " };
            println!("{marker} {:<12} {}", direction.id, direction.name);
            let names: Vec<&str> = direction.subjects.iter().map(CurriculumEntity::name).collect();
            println!("    {}", names.join(", "));
        }
        return Ok(());
    };

    let had_grades = session.data.years.third.subjects.iter().any(has_any_grade);
    select_direction(&mut session.data, id).map_err(|e| format!("✗ {e}"))?;
    session.save()?;
    info!("Year 3 direction set to {id}");
    println!("✓ Selected {id} for year 3");
    if had_grades {
        println!("⚠️  Year 3 grades from the previous direction were removed");
    }
    Ok(())
}

/// List a year's subjects with their grades
pub fn subjects(config: &Config, year: Option<Year>) -> Result<(), String> {
    let session = Session::open_onboarded(config)?;
    let year = session.year(year);
    let entities = subjects_for_year(&session.data, year);

    println!("\n=== Year {year} Subjects ===\n");
    if entities.is_empty() {
        println!("  No subjects. Choose a direction with `gradetracker direction <ID>`.");
        return Ok(());
    }

    for entity in &entities {
        let row = SubjectRow::from_entity(entity);
        println!("  {:<20} {:>4}   [{}]", row.name, row.display_grade(), row.id);
        match entity {
            CurriculumEntity::Subject(subject) => print_grades(subject, "    "),
            CurriculumEntity::Combined(combined) => {
                for (member, member_row) in combined.subjects.iter().zip(&row.members) {
                    println!(
                        "    - {:<16} {:>4}   [{}]",
                        member_row.name,
                        member_row.display_grade(),
                        member_row.id
                    );
                    print_grades(member, "        ");
                }
            }
        }
    }
    verbose!("\n{NO_GRADE} marks a subject without grades");
    Ok(())
}

fn print_grades(subject: &Subject, indent: &str) {
    for grade in &subject.grades {
        let label = grade.label.as_deref().unwrap_or("");
        println!(
            "{indent}{:.2} ×{:<5} {label:<16} {}",
            grade.value, grade.weight, grade.id
        );
    }
}

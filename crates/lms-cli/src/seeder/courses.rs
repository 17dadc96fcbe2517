//! Course seeding functionality.

use anyhow::{Context, bail};
use lms_db::{AccountStore, CourseStore, StoreError};
use lms_models::{NewCourse, Role};
use std::time::Instant;

use super::models::{CourseSeed, SeedSummary};

/// The fixed demo catalogue.
pub fn demo_courses() -> Vec<CourseSeed> {
    vec![
        CourseSeed {
            code: "MATH101",
            title: "Algebra I",
            description: "Linear equations, inequalities and functions.",
        },
        CourseSeed {
            code: "MATH201",
            title: "Geometry",
            description: "Proofs, congruence, similarity and trigonometry.",
        },
        CourseSeed {
            code: "ENG101",
            title: "English Composition",
            description: "Essay structure, argument and revision.",
        },
        CourseSeed {
            code: "SCI101",
            title: "Biology",
            description: "Cells, genetics and ecosystems.",
        },
        CourseSeed {
            code: "SCI201",
            title: "Chemistry",
            description: "Atomic structure, bonding and reactions.",
        },
        CourseSeed {
            code: "HIST101",
            title: "World History",
            description: "Civilizations from antiquity to the modern era.",
        },
        CourseSeed {
            code: "CS101",
            title: "Introduction to Programming",
            description: "Variables, control flow and problem solving.",
        },
    ]
}

/// Inserts `seeds`, assigning them round-robin to existing teachers.
///
/// The course at position `i` goes to teacher `i % teachers`, teachers
/// ordered oldest first. Codes that already exist are skipped.
pub async fn seed_courses<S>(store: &S, seeds: &[CourseSeed]) -> anyhow::Result<SeedSummary>
where
    S: AccountStore + CourseStore + ?Sized,
{
    let start_time = Instant::now();

    let teachers = store
        .list_by_role(Role::Teacher)
        .await
        .context("Failed to list teachers")?;

    if teachers.is_empty() {
        bail!("No teachers found. Run `seed-users` first.");
    }

    println!(
        "📚 Seeding {} courses across {} teachers...",
        seeds.len(),
        teachers.len()
    );

    let mut summary = SeedSummary::default();

    for (idx, seed) in seeds.iter().enumerate() {
        if store.find_course_by_code(seed.code).await?.is_some() {
            tracing::debug!(code = seed.code, "Seed course exists, skipping");
            summary.skipped += 1;
            continue;
        }

        let teacher = &teachers[idx % teachers.len()];
        let result = store
            .create_course(NewCourse {
                code: seed.code.to_string(),
                title: seed.title.to_string(),
                description: Some(seed.description.to_string()),
                teacher_id: teacher.id,
            })
            .await;

        match result {
            Ok(course) => {
                tracing::info!(code = %course.code, teacher = %teacher.email, "Seeded course");
                summary.created += 1;
            }
            Err(StoreError::Conflict(_)) => summary.skipped += 1,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to seed course {}", seed.code));
            }
        }
    }

    println!(
        "✅ Seeded courses: {} created, {} skipped in {:?}",
        summary.created,
        summary.skipped,
        start_time.elapsed()
    );

    Ok(summary)
}

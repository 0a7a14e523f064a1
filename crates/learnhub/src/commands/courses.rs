//! Course catalog command handlers.

use std::sync::Arc;

use tabled::Tabled;

use learnhub_core::{CoreError, Course, EntityId};

use crate::cli::{CoursesArgs, CoursesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CourseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Instructor")]
    instructor: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Visible")]
    visible: String,
}

impl From<&Arc<Course>> for CourseRow {
    fn from(course: &Arc<Course>) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title.clone(),
            instructor: course.instructor.clone().unwrap_or_default(),
            price: output::format_price(course.price),
            visible: if course.is_visible() { "yes" } else { "no" }.into(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: CoursesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let portal = super::oneshot_portal(global, false).await?;

    match args.command {
        CoursesCommand::List { all } => {
            let courses = if all {
                portal.store().courses().iter().cloned().collect()
            } else {
                portal.store().visible_courses()
            };
            let out = output::render_list(
                &global.output,
                &courses,
                |course| CourseRow::from(course),
                |course| course.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CoursesCommand::Show { id } => {
            let course = portal
                .store()
                .course(&EntityId::from(id.as_str()))
                .ok_or(CoreError::CourseNotFound { identifier: id })?;
            let out = output::render_single(
                &global.output,
                &course,
                |course| detail(course),
                |course| course.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

fn detail(course: &Course) -> String {
    let mut lines = vec![
        format!("id:          {}", course.id),
        format!("title:       {}", course.title),
        format!("published:   {}", course.published),
        format!("approved:    {}", course.admin_approved),
        format!("visible:     {}", course.is_visible()),
        format!("price:       {}", output::format_price(course.price)),
    ];
    if let Some(instructor) = &course.instructor {
        lines.push(format!("instructor:  {instructor}"));
    }
    lines.join("\n")
}

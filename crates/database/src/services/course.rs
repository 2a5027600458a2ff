use crate::entities::course;
use models::{course::Course, course_code::CourseCode, credits::CreditRange};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use std::collections::{BTreeMap, HashMap};

pub struct CourseService;

impl CourseService {
    /// Batch-fetch catalog courses by code for one catalog year,
    /// keyed by their display code ("CS 1101"). Codes that fail to
    /// parse or resolve simply don't appear in the map.
    pub async fn get_courses_by_codes(
        db: &DatabaseConnection,
        codes: &[String],
        catalog_year: i16,
    ) -> Result<HashMap<String, Course>, DbErr> {
        let parsed: Vec<CourseCode> = codes.iter().filter_map(|c| c.parse().ok()).collect();
        if parsed.is_empty() {
            return Ok(HashMap::new());
        }

        let mut code_condition = Condition::any();
        for code in &parsed {
            code_condition = code_condition.add(
                Condition::all()
                    .add(course::Column::Subject.eq(code.subject()))
                    .add(course::Column::Number.eq(code.number())),
            );
        }

        let rows = course::Entity::find()
            .filter(course::Column::CatalogYear.eq(catalog_year))
            .filter(code_condition)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let course = Self::to_engine_course(&row);
                (course.code.to_string(), course)
            })
            .collect())
    }

    /// Converts a catalog row into the engine's course view
    pub fn to_engine_course(row: &course::Model) -> Course {
        let attributes: BTreeMap<String, Vec<String>> =
            serde_json::from_value(row.attributes.clone()).unwrap_or_default();

        Course {
            code: CourseCode::new(&row.subject, &row.number),
            title: row.title.clone(),
            credits: row.credits.parse().unwrap_or(CreditRange::Single(0.0)),
            attributes,
        }
    }
}

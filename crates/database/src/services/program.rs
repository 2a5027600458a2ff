use crate::entities::program;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

pub struct ProgramService;

impl ProgramService {
    pub async fn get_program(
        db: &DatabaseConnection,
        program_id: Uuid,
    ) -> Result<Option<program::Model>, DbErr> {
        program::Entity::find_by_id(program_id).one(db).await
    }

    /// Batch-fetch programs by id
    pub async fn get_programs(
        db: &DatabaseConnection,
        program_ids: Vec<Uuid>,
    ) -> Result<Vec<program::Model>, DbErr> {
        if program_ids.is_empty() {
            return Ok(vec![]);
        }

        program::Entity::find()
            .filter(program::Column::Id.is_in(program_ids))
            .all(db)
            .await
    }

    /// Load-time configuration check over a program's requirement
    /// tree. The engine treats malformed rules as no-matches; this is
    /// for rejecting bad configuration before it is saved or served.
    pub fn validate_requirements(program: &program::Model) -> Vec<String> {
        program.requirements.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use sea_orm::prelude::Uuid;

    #[test]
    fn test_validate_requirements_flags_bad_configuration() {
        let requirements = serde_json::from_str(
            r#"{
                "sections": [{
                    "id": "core",
                    "title": "Core",
                    "creditsRequired": 3,
                    "requirements": [{
                        "id": "open",
                        "creditsRequired": 3,
                        "rule": {
                            "type": "take_any_courses",
                            "filter": {"type": "course_list", "courses": []},
                            "creditsRequired": 3
                        }
                    }]
                }]
            }"#,
        )
        .unwrap();

        let program = program::Model {
            id: Uuid::new_v4(),
            name: "Computer Science".to_string(),
            program_type: "major".to_string(),
            catalog_year: 2026,
            requirements,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        };

        let errors = ProgramService::validate_requirements(&program);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("core.open"));
    }
}

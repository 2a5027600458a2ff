use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Catalog lookups resolve planned-course codes per catalog year
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_subject_number_year")
                    .table(Courses::Table)
                    .col(Courses::Subject)
                    .col(Courses::Number)
                    .col(Courses::CatalogYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on planned_courses.plan_id for plan loads
        manager
            .create_index(
                Index::create()
                    .name("idx_planned_courses_plan_id")
                    .table(PlannedCourses::Table)
                    .col(PlannedCourses::PlanId)
                    .to_owned(),
            )
            .await?;

        // Index on plan_programs.plan_id for plan loads
        manager
            .create_index(
                Index::create()
                    .name("idx_plan_programs_plan_id")
                    .table(PlanPrograms::Table)
                    .col(PlanPrograms::PlanId)
                    .to_owned(),
            )
            .await?;

        // Indexes on requirement_fulfillments for clears and listings
        manager
            .create_index(
                Index::create()
                    .name("idx_requirement_fulfillments_plan_program_id")
                    .table(RequirementFulfillments::Table)
                    .col(RequirementFulfillments::PlanProgramId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_requirement_fulfillments_planned_course_id")
                    .table(RequirementFulfillments::Table)
                    .col(RequirementFulfillments::PlannedCourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_requirement_fulfillments_planned_course_id")
                    .table(RequirementFulfillments::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_requirement_fulfillments_plan_program_id")
                    .table(RequirementFulfillments::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_plan_programs_plan_id")
                    .table(PlanPrograms::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_planned_courses_plan_id")
                    .table(PlannedCourses::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_subject_number_year")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    Subject,
    Number,
    CatalogYear,
}

#[derive(Iden)]
enum PlannedCourses {
    Table,
    PlanId,
}

#[derive(Iden)]
enum PlanPrograms {
    Table,
    PlanId,
}

#[derive(Iden)]
enum RequirementFulfillments {
    Table,
    PlanProgramId,
    PlannedCourseId,
}

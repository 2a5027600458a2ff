use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Subject).string().not_null())
                    .col(ColumnDef::new(Courses::Number).string().not_null())
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Credits).string().not_null())
                    .col(ColumnDef::new(Courses::Attributes).json().not_null())
                    .col(
                        ColumnDef::new(Courses::CatalogYear)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Courses::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create plans table
        manager
            .create_table(
                Table::create()
                    .table(Plans::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Plans::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Plans::Name).string().not_null())
                    .col(
                        ColumnDef::new(Plans::CatalogYear)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Plans::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Plans::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create planned_courses table
        manager
            .create_table(
                Table::create()
                    .table(PlannedCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlannedCourses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PlannedCourses::PlanId).uuid().not_null())
                    .col(
                        ColumnDef::new(PlannedCourses::CourseCode)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlannedCourses::SemesterNumber)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlannedCourses::Position)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PlannedCourses::Credits).integer().not_null())
                    .col(
                        ColumnDef::new(PlannedCourses::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-planned_courses-plan_id")
                            .from(PlannedCourses::Table, PlannedCourses::PlanId)
                            .to(Plans::Table, Plans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create programs table
        manager
            .create_table(
                Table::create()
                    .table(Programs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Programs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Programs::Name).string().not_null())
                    .col(ColumnDef::new(Programs::ProgramType).string().not_null())
                    .col(
                        ColumnDef::new(Programs::CatalogYear)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Programs::Requirements).json().not_null())
                    .col(
                        ColumnDef::new(Programs::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Programs::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create plan_programs junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(PlanPrograms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlanPrograms::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PlanPrograms::PlanId).uuid().not_null())
                    .col(ColumnDef::new(PlanPrograms::ProgramId).uuid().not_null())
                    .col(
                        ColumnDef::new(PlanPrograms::Position)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlanPrograms::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-plan_programs-plan_id")
                            .from(PlanPrograms::Table, PlanPrograms::PlanId)
                            .to(Plans::Table, Plans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-plan_programs-program_id")
                            .from(PlanPrograms::Table, PlanPrograms::ProgramId)
                            .to(Programs::Table, Programs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create requirement_fulfillments table
        manager
            .create_table(
                Table::create()
                    .table(RequirementFulfillments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RequirementFulfillments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RequirementFulfillments::PlanProgramId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RequirementFulfillments::RequirementId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RequirementFulfillments::PlannedCourseId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RequirementFulfillments::CreditsApplied)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RequirementFulfillments::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-requirement_fulfillments-plan_program_id")
                            .from(
                                RequirementFulfillments::Table,
                                RequirementFulfillments::PlanProgramId,
                            )
                            .to(PlanPrograms::Table, PlanPrograms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-requirement_fulfillments-planned_course_id")
                            .from(
                                RequirementFulfillments::Table,
                                RequirementFulfillments::PlannedCourseId,
                            )
                            .to(PlannedCourses::Table, PlannedCourses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse dependency order
        manager
            .drop_table(
                Table::drop()
                    .table(RequirementFulfillments::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(PlanPrograms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlannedCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Programs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Plans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Subject,
    Number,
    Title,
    Credits,
    Attributes,
    CatalogYear,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Plans {
    Table,
    Id,
    Name,
    CatalogYear,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PlannedCourses {
    Table,
    Id,
    PlanId,
    CourseCode,
    SemesterNumber,
    Position,
    Credits,
    CreatedAt,
}

#[derive(Iden)]
enum Programs {
    Table,
    Id,
    Name,
    ProgramType,
    CatalogYear,
    Requirements,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PlanPrograms {
    Table,
    Id,
    PlanId,
    ProgramId,
    Position,
    CreatedAt,
}

#[derive(Iden)]
enum RequirementFulfillments {
    Table,
    Id,
    PlanProgramId,
    RequirementId,
    PlannedCourseId,
    CreditsApplied,
    CreatedAt,
}

use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum CompanyTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
enum Partners {
    Table,
    Id,
    CompanyName,
    TypeId,
    DirectorFullName,
    Phone,
    Rating,
    Discount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PartnerSales {
    Table,
    Id,
    ProductId,
    PartnerId,
    Quantity,
    DateOfSale,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CompanyTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompanyTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CompanyTypes::Name).string_len(128).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Products::Description)
                            .string_len(512)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Partners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Partners::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Partners::CompanyName)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Partners::TypeId).integer())
                    .col(
                        ColumnDef::new(Partners::DirectorFullName)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Partners::Phone).string_len(64).not_null())
                    .col(ColumnDef::new(Partners::Rating).double().not_null())
                    .col(
                        ColumnDef::new(Partners::Discount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Partners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("now()")),
                    )
                    .col(
                        ColumnDef::new(Partners::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("now()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partners_company_type")
                            .from(Partners::Table, Partners::TypeId)
                            .to(CompanyTypes::Table, CompanyTypes::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_partners_company_name")
                    .table(Partners::Table)
                    .col(Partners::CompanyName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PartnerSales::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PartnerSales::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PartnerSales::ProductId).integer().not_null())
                    .col(ColumnDef::new(PartnerSales::PartnerId).integer().not_null())
                    .col(ColumnDef::new(PartnerSales::Quantity).integer().not_null())
                    .col(ColumnDef::new(PartnerSales::DateOfSale).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partner_sales_product")
                            .from(PartnerSales::Table, PartnerSales::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partner_sales_partner")
                            .from(PartnerSales::Table, PartnerSales::PartnerId)
                            .to(Partners::Table, Partners::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_partner_sales_partner")
                    .table(PartnerSales::Table)
                    .col(PartnerSales::PartnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_partner_sales_date")
                    .table(PartnerSales::Table)
                    .col(PartnerSales::DateOfSale)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PartnerSales::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Partners::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CompanyTypes::Table).to_owned())
            .await?;
        Ok(())
    }
}

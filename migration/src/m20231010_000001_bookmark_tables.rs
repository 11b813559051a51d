use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 记录表：id -> 序列化后的 Bookmark
        manager
            .create_table(
                Table::create()
                    .table(Bookmarks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookmarks::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookmarks::Value).text().not_null())
                    .to_owned(),
            )
            .await?;

        // 路由索引表：route -> bookmark id
        manager
            .create_table(
                Table::create()
                    .table(RouteIndex::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RouteIndex::Route)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RouteIndex::BookmarkId).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_route_index_bookmark_id")
                    .table(RouteIndex::Table)
                    .col(RouteIndex::BookmarkId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_route_index_bookmark_id")
                    .table(RouteIndex::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RouteIndex::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Bookmarks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bookmarks {
    Table,
    Id,
    Value,
}

#[derive(DeriveIden)]
enum RouteIndex {
    Table,
    Route,
    BookmarkId,
}

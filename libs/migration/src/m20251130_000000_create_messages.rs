use sea_orm_migration::sea_query::extension::postgres::{Type, TypeCreateStatement};
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_type(create_message_type()).await?;
        manager.create_table(create_messages_table()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Messages::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_type(Type::drop().if_exists().name(MessageType::Enum).to_owned())
            .await?;

        Ok(())
    }
}

fn create_message_type() -> TypeCreateStatement {
    Type::create()
        .as_enum(MessageType::Enum)
        .values([MessageType::Message, MessageType::Answer])
        .to_owned()
}

fn create_messages_table() -> TableCreateStatement {
    Table::create()
        .table(Messages::Table)
        .col(pk_auto(Messages::Id))
        .col(
            ColumnDef::new(Messages::Uuid)
                .uuid()
                .not_null()
                .unique_key()
                .default(Expr::cust("gen_random_uuid()")),
        )
        .col(timestamp(Messages::CreatedAt).default(Expr::current_timestamp()))
        .col(timestamp(Messages::UpdatedAt).default(Expr::current_timestamp()))
        .col(json_binary(Messages::Content))
        .col(
            ColumnDef::new(Messages::Type)
                .enumeration(MessageType::Enum, [MessageType::Message, MessageType::Answer])
                .not_null(),
        )
        .to_owned()
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Id,
    Uuid,
    CreatedAt,
    UpdatedAt,
    Content,
    Type,
}

#[derive(DeriveIden)]
enum MessageType {
    #[sea_orm(iden = "message_type")]
    Enum,
    #[sea_orm(iden = "message")]
    Message,
    #[sea_orm(iden = "answer")]
    Answer,
}

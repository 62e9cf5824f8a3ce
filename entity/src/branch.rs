use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of business run at a branch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "snake_case")]
pub enum BranchKind {
    #[sea_orm(string_value = "cafe")]
    Cafe,
    #[sea_orm(string_value = "hotel")]
    Hotel,
}

impl BranchKind {
    /// Human readable label used in printouts and spreadsheets
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cafe => "Cafe",
            Self::Hotel => "Hotel",
        }
    }
}

impl Default for BranchKind {
    fn default() -> Self {
        Self::Cafe
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "branch")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub name: String,
    pub kind: BranchKind,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub phone: String,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub manager: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::staff::Entity")]
    Staff,
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

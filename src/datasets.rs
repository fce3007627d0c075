//! The four fixed datasets and the order they are loaded in.
//!
//! Column order here is load-bearing: it is the order tables are created
//! with and the order the copy buffer is serialized in, and it must match
//! the header row of each source file.

use crate::schema::{ColumnDef, DatasetSpec, SqlType};

pub const SURVEY: DatasetSpec = DatasetSpec {
    table: "survey",
    file_name: "survey.csv",
    columns: &[
        ColumnDef {
            name: "question",
            sql_type: SqlType::Text,
            nullable: false,
        },
        ColumnDef {
            name: "user_id",
            sql_type: SqlType::VarChar(255),
            nullable: false,
        },
        ColumnDef {
            name: "response",
            sql_type: SqlType::Text,
            nullable: false,
        },
    ],
};

pub const QUIZ: DatasetSpec = DatasetSpec {
    table: "quiz",
    file_name: "quiz.csv",
    columns: &[
        ColumnDef {
            name: "user_id",
            sql_type: SqlType::VarChar(255),
            nullable: false,
        },
        ColumnDef {
            name: "style",
            sql_type: SqlType::Text,
            nullable: false,
        },
        ColumnDef {
            name: "fit",
            sql_type: SqlType::Text,
            nullable: false,
        },
        ColumnDef {
            name: "shape",
            sql_type: SqlType::Text,
            nullable: false,
        },
        ColumnDef {
            name: "color",
            sql_type: SqlType::Text,
            nullable: false,
        },
    ],
};

pub const HOME_TRY_ON: DatasetSpec = DatasetSpec {
    table: "home_try_on",
    file_name: "home_try_on.csv",
    columns: &[
        ColumnDef {
            name: "user_id",
            sql_type: SqlType::VarChar(255),
            nullable: false,
        },
        ColumnDef {
            name: "number_of_pairs",
            sql_type: SqlType::Text,
            nullable: false,
        },
        ColumnDef {
            name: "address",
            sql_type: SqlType::Text,
            nullable: false,
        },
    ],
};

pub const PURCHASE: DatasetSpec = DatasetSpec {
    table: "purchase",
    file_name: "purchase.csv",
    columns: &[
        ColumnDef {
            name: "user_id",
            sql_type: SqlType::VarChar(255),
            nullable: false,
        },
        ColumnDef {
            name: "product_id",
            sql_type: SqlType::Integer,
            nullable: false,
        },
        ColumnDef {
            name: "style",
            sql_type: SqlType::Text,
            nullable: false,
        },
        ColumnDef {
            name: "model_name",
            sql_type: SqlType::Text,
            nullable: false,
        },
        ColumnDef {
            name: "color",
            sql_type: SqlType::Text,
            nullable: false,
        },
        ColumnDef {
            name: "price",
            sql_type: SqlType::Integer,
            nullable: false,
        },
    ],
};

/// Every dataset, in load order.
pub const DATASETS: &[DatasetSpec] = &[SURVEY, QUIZ, HOME_TRY_ON, PURCHASE];

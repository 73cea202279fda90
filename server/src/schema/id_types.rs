use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use quarkhub_core::model;

macro_rules! impl_api_id {
    ($ident:ident) => {
        impl From<&model::$ident> for $ident {
            fn from(value: &model::$ident) -> Self {
                $ident(value.0.clone())
            }
        }

        impl From<model::$ident> for $ident {
            fn from(value: model::$ident) -> Self {
                $ident(value.0)
            }
        }

        impl From<$ident> for model::$ident {
            fn from(value: $ident) -> Self {
                model::$ident(value.0)
            }
        }
    };
}

// Declared outside the macro so the ToSchema derive stays visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash, ToSchema)]
pub struct ResourceId(pub String);
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash, ToSchema)]
pub struct CategoryId(pub String);

impl_api_id!(ResourceId);
impl_api_id!(CategoryId);

use crate::model::ProductTag;

crate::resource_client!(ProductTagClient, ProductTag, product_tag, product_tags);

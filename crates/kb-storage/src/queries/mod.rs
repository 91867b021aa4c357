pub mod embedding_ops;
pub mod entry_crud;
pub mod entry_query;
pub mod fulltext_search;

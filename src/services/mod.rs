// Marksync services
// Services cover validation, the mutation path, and the external
// collaborators: the Bookmark Store, the Change Feed, and the Identity
// Provider.

pub mod change_feed;
pub mod identity;
pub mod memory_store;
pub mod mutation_submitter;
pub mod store_client;
pub mod validation;

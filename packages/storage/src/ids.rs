// ABOUTME: Identifier generation for Groundwork entities
// ABOUTME: UUID v4 for row ids, nanoid for single-use response tokens

use uuid::Uuid;

/// Length of proposal response tokens. Long enough to be unguessable,
/// short enough to survive being pasted into an email link.
const RESPONSE_TOKEN_LEN: usize = 24;

/// Generates a new entity id (UUID v4, string form)
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a single-use proposal response token
pub fn new_response_token() -> String {
    nanoid::nanoid!(RESPONSE_TOKEN_LEN)
}

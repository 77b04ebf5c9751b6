//! Wire models exchanged with the database server
//!
//! Request bodies serialize to the JSON the server expects. Response types
//! ignore unknown fields so extra server columns do not break decoding.

mod autocomplete;
mod line_ups;
mod names;

pub use autocomplete::{ArtistCandidate, CandidateName, LineUpCandidate, LineUpMemberCandidate};
pub use line_ups::{
    AddLineUpMemberRequest, AddSongArtistRequest, LineUp, LineUpCreated, LineupMembership,
    MemberLink, RoleType, ServerFeedback, SongArtistLink,
};
pub use names::{
    AnimeNameRequest, ArtistName, ArtistNameRequest, NameOrder, NamedEntity, ReorderRequest,
};

//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM operations
//! for venues, artists and shows. Repositories borrow any [`sea_orm::ConnectionTrait`]
//! so the same calls run against the pool or inside a transaction.

use sea_orm::sea_query::{Expr, IntoColumnRef, LikeExpr, SimpleExpr};

use crate::models::search_key;

pub mod artist;
pub mod show;
pub mod venue;

pub use artist::ArtistRepository;
pub use show::{ShowListingRow, ShowRepository, ShowWithArtist, ShowWithVenue};
pub use venue::{CityGroup, VenueRepository};

/// Number of rows shown in the "recently listed" sections.
pub const RECENT_LIMIT: u64 = 10;

const LIKE_ESCAPE: char = '!';

/// Case-insensitive "name contains `term`" condition against a `name_search`
/// column. Wildcards in `term` match literally.
pub(crate) fn name_contains<C>(search_column: C, term: &str) -> SimpleExpr
where
    C: IntoColumnRef,
{
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in search_key(term).chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');

    Expr::col(search_column).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::venue;
    use sea_orm::sea_query::{Query, SqliteQueryBuilder};

    #[test]
    fn test_name_contains_builds_lowercase_like() {
        let sql = Query::select()
            .column(venue::Column::Id)
            .from(venue::Entity)
            .and_where(name_contains(
                (venue::Entity, venue::Column::NameSearch),
                "100%_Hop École",
            ))
            .to_string(SqliteQueryBuilder);

        assert!(sql.contains("\"name_search\" LIKE"), "{sql}");
        assert!(!sql.contains("LOWER("), "{sql}");
        assert!(sql.contains("école%'"), "{sql}");
        assert!(sql.contains("100!%!_hop"), "{sql}");
        assert!(sql.contains("ESCAPE"), "{sql}");
        assert!(!sql.contains("Hop"), "term is lowercased: {sql}");
    }
}

//! Relevance Ranking
//!
//! Scores a fetched row against the query and its key terms. Ranking is a
//! pure function of the row's text fields, so every content type shares one
//! formula and results from different tables compare directly.

/// Rank for the raw query appearing in the title.
pub const TITLE_MATCH_RANK: i64 = 100;
/// Rank for the raw query appearing in the excerpt.
pub const EXCERPT_MATCH_RANK: i64 = 80;
/// Rank for the raw query appearing in the body.
pub const CONTENT_MATCH_RANK: i64 = 60;
/// Base rank for a key term appearing in the title.
pub const TERM_TITLE_RANK: i64 = 90;
/// Base rank for a key term appearing in the body.
pub const TERM_CONTENT_RANK: i64 = 70;
/// Rank lost per key-term position; later terms matter less.
pub const TERM_INDEX_DECAY: i64 = 5;
/// Bonus applied to featured rows after the floor.
pub const FEATURED_BONUS: i64 = 20;
/// Every returned row ranks at least this much.
pub const MINIMUM_RANK: i64 = 10;

pub const MATCH_EXACT_TITLE: &str = "exact_title";
pub const MATCH_EXCERPT: &str = "excerpt_match";
pub const MATCH_CONTENT: &str = "content_match";
pub const MATCH_KEY_TERM_TITLE: &str = "key_term_title";
pub const MATCH_KEY_TERM_CONTENT: &str = "key_term_content";
pub const MATCH_GENERAL: &str = "general_match";
/// Tag for rows produced by the broad fallback pass.
pub const MATCH_FALLBACK: &str = "fallback_ilike";

/// Scores one row, returning its rank and the strongest match kind found.
///
/// Contributions accumulate across tiers; the floor applies before the
/// featured bonus so a featured row always outranks an otherwise identical
/// plain one.
pub fn rank_candidate(
    query: &str,
    terms: &[String],
    title: &str,
    excerpt: Option<&str>,
    body: &str,
    featured: bool,
) -> (f64, &'static str) {
    let query = query.to_lowercase();
    let title = title.to_lowercase();
    let excerpt = excerpt.map(|text| text.to_lowercase());
    let body = body.to_lowercase();

    let mut rank: i64 = 0;
    let mut title_hit = false;
    let mut excerpt_hit = false;
    let mut body_hit = false;
    let mut term_title_hit = false;
    let mut term_body_hit = false;

    if title.contains(&query) {
        rank += TITLE_MATCH_RANK;
        title_hit = true;
    }
    if let Some(excerpt) = &excerpt
        && excerpt.contains(&query)
    {
        rank += EXCERPT_MATCH_RANK;
        excerpt_hit = true;
    }
    if body.contains(&query) {
        rank += CONTENT_MATCH_RANK;
        body_hit = true;
    }

    for (index, term) in terms.iter().enumerate() {
        let decay = TERM_INDEX_DECAY * index as i64;
        if title.contains(term.as_str()) {
            rank += (TERM_TITLE_RANK - decay).max(0);
            term_title_hit = true;
        }
        if body.contains(term.as_str()) {
            rank += (TERM_CONTENT_RANK - decay).max(0);
            term_body_hit = true;
        }
    }

    if rank == 0 {
        rank = MINIMUM_RANK;
    }
    if featured {
        rank += FEATURED_BONUS;
    }

    let match_type = if title_hit {
        MATCH_EXACT_TITLE
    } else if excerpt_hit {
        MATCH_EXCERPT
    } else if body_hit {
        MATCH_CONTENT
    } else if term_title_hit {
        MATCH_KEY_TERM_TITLE
    } else if term_body_hit {
        MATCH_KEY_TERM_CONTENT
    } else {
        MATCH_GENERAL
    };

    (rank as f64, match_type)
}

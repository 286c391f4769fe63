//! Markup for suggestions, a single movie, and recommendation lists.
//!
//! All server-provided text goes through [`escape`]; nothing here inserts a
//! raw field into markup.

use crate::models::{MovieDetail, RecommendationItem, SearchResultItem};

use super::escape::escape;

pub const NO_RESULTS: &str = "No results";
pub const NO_SUMMARY: &str = "No summary available.";

/// Suggestion panel content; an empty list yields the "no results" placeholder
pub fn render_suggestions(items: &[SearchResultItem]) -> String {
    if items.is_empty() {
        return format!(r#"<div class="suggestion-empty">{NO_RESULTS}</div>"#);
    }

    items
        .iter()
        .map(|item| {
            format!(
                r#"<div class="suggestion-item" data-id="{}">{}</div>"#,
                escape(&item.movie_id),
                escape(&item.title)
            )
        })
        .collect()
}

/// `★ 4/5`, or nothing when the score is absent or zero
pub fn star_rating(score: Option<f64>) -> Option<String> {
    match score {
        Some(s) if s != 0.0 && !s.is_nan() => Some(format!("★ {}/5", escape(&s))),
        _ => None,
    }
}

fn join_genres(genres: &[String]) -> String {
    escape(&genres.join(", "))
}

/// Detail view for one selected movie
pub fn render_single(detail: &MovieDetail) -> String {
    let summary = match detail.summary.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => NO_SUMMARY,
    };
    let rating = star_rating(detail.score)
        .map(|r| format!(r#"<div class="movie-score">{r}</div>"#))
        .unwrap_or_default();

    format!(
        r#"<div class="movie-card">
  <div class="movie-icon">🎬</div>
  <div>
    <h3 class="movie-title">{title}</h3>
    <div class="movie-genres">Genres: {genres}</div>
    <div class="movie-summary">{summary}</div>
    {rating}
  </div>
</div>"#,
        title = escape(&detail.title),
        genres = join_genres(&detail.predicted_genres),
        summary = escape(summary),
    )
}

/// One card per item, in server order
pub fn render_list(items: &[RecommendationItem]) -> String {
    items
        .iter()
        .map(|item| {
            let rating = star_rating(item.score)
                .map(|r| format!(r#"<span class="rating">{r}</span>"#))
                .unwrap_or_default();
            format!(
                r#"<div class="movie-card">
  <div class="movie-icon">🎬</div>
  <div>
    <h3 class="movie-title">{title}</h3>
    <div class="movie-genres">{genres}</div>
    <div class="movie-summary">{summary}</div>
    <div class="movie-score">{rating}</div>
  </div>
</div>"#,
                title = escape(&item.title),
                genres = join_genres(&item.predicted_genres),
                summary = escape(&item.summary),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, score: Option<f64>) -> RecommendationItem {
        RecommendationItem {
            title: title.to_string(),
            predicted_genres: vec!["Drama".to_string(), "Crime".to_string()],
            summary: Some("A heist.".to_string()),
            score,
        }
    }

    #[test]
    fn test_zero_score_has_no_rating() {
        let markup = render_list(&[item("Heat", Some(0.0))]);
        assert!(!markup.contains('★'));
        assert!(markup.contains("Heat"));
    }

    #[test]
    fn test_nonzero_score_shows_stars() {
        let markup = render_list(&[item("Heat", Some(4.0))]);
        assert!(markup.contains("★ 4/5"));
        assert_eq!(star_rating(Some(3.5)).as_deref(), Some("★ 3.5/5"));
        assert_eq!(star_rating(None), None);
    }

    #[test]
    fn test_list_preserves_order_and_joins_genres() {
        let markup = render_list(&[item("First", None), item("Second", None)]);
        let first = markup.find("First").unwrap();
        let second = markup.find("Second").unwrap();
        assert!(first < second);
        assert!(markup.contains("Drama, Crime"));
    }

    #[test]
    fn test_list_missing_summary_is_blank() {
        let mut entry = item("Quiet", None);
        entry.summary = None;
        let markup = render_list(&[entry]);
        assert!(markup.contains(r#"<div class="movie-summary"></div>"#));
        assert!(!markup.contains(NO_SUMMARY));
    }

    #[test]
    fn test_single_uses_summary_fallback_and_genre_label() {
        let detail = MovieDetail {
            title: "Alien".to_string(),
            predicted_genres: vec!["Horror".to_string()],
            summary: None,
            score: Some(0.0),
        };
        let markup = render_single(&detail);
        assert!(markup.contains(NO_SUMMARY));
        assert!(markup.contains("Genres: Horror"));
        assert!(!markup.contains('★'));
    }

    #[test]
    fn test_untrusted_fields_are_escaped() {
        let detail = MovieDetail {
            title: "<script>alert(1)</script>".to_string(),
            predicted_genres: vec!["<b>".to_string()],
            summary: Some("\"quoted\" & 'single'".to_string()),
            score: Some(5.0),
        };
        let markup = render_single(&detail);
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(markup.contains("&lt;b&gt;"));
        assert!(markup.contains("&quot;quoted&quot; &amp; &#039;single&#039;"));
        assert!(markup.contains("★ 5/5"));
    }

    #[test]
    fn test_suggestions_escape_id_and_title() {
        let items = vec![SearchResultItem {
            movie_id: "1\" onclick=\"x".to_string(),
            title: "Tom & Jerry".to_string(),
        }];
        let markup = render_suggestions(&items);
        assert!(markup.contains(r#"data-id="1&quot; onclick=&quot;x""#));
        assert!(markup.contains("Tom &amp; Jerry"));
    }

    #[test]
    fn test_empty_suggestions_render_placeholder() {
        assert!(render_suggestions(&[]).contains(NO_RESULTS));
    }
}

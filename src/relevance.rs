// src/relevance.rs
//! Relevance filter: keeps articles that mention anything the user holds
//! or watches. Pure functions, no I/O.

use crate::article::Article;
use crate::keywords::KeywordSet;

/// Searchable text of one article: title, summary, body and tag-like
/// fields, lowercased. Description folds into `summary` during
/// normalization, so it is covered here as well.
fn haystack(article: &Article) -> String {
    let mut parts: Vec<&str> = vec![&article.title, &article.summary];
    if let Some(meta) = &article.reddit {
        if let Some(body) = &meta.selftext {
            parts.push(body);
        }
        parts.push(&meta.subreddit);
    }
    let currencies = article
        .currencies
        .iter()
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    parts.push(&currencies);
    parts.join(" ").to_lowercase()
}

/// An article passes iff any keyword appears as a substring of its
/// searchable text. An empty keyword set is the identity filter.
pub fn matches_keywords(article: &Article, keywords: &KeywordSet) -> bool {
    if keywords.is_empty() {
        return true;
    }
    let text = haystack(article);
    keywords.iter().any(|kw| text.contains(kw.as_str()))
}

/// Filter a batch, preserving order.
pub fn filter_articles(articles: Vec<Article>, keywords: &KeywordSet) -> Vec<Article> {
    if keywords.is_empty() {
        return articles;
    }
    articles
        .into_iter()
        .filter(|a| matches_keywords(a, keywords))
        .collect()
}

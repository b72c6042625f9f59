//! News article source and the tools exposed over it.
//!
//! The store is a tab-separated dataset of article rows (id, category,
//! subcategory, title, abstract, url, ...) loaded once at startup and queried
//! read-only by category, title, or id. The three registered tools mirror the
//! queries one-to-one and render their results as plain strings for the model.

use super::{ParamSpec, ToolDescriptor, ToolRegistry};
use rand::seq::SliceRandom;
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;
use std::sync::Arc;

/// Categories present in the dataset, also the closed set the model may pass.
pub const NEWS_CATEGORIES: &[&str] = &[
    "sports",
    "travel",
    "health",
    "news",
    "movies",
    "tv",
    "entertainment",
    "video",
    "lifestyle",
    "finance",
    "kids",
    "weather",
    "northamerica",
    "autos",
    "foodanddrink",
    "music",
];

/// One news article row.
#[derive(Debug, Clone)]
pub struct Article {
    pub id: String,
    pub category: String,
    pub subcategory: String,
    pub title: String,
    pub abstract_text: String,
    pub url: String,
}

/// In-memory, read-only article store.
#[derive(Debug)]
pub struct NewsStore {
    articles: Vec<Article>,
}

impl NewsStore {
    /// Load articles from a tab-separated file. Rows without an id or title
    /// are skipped; a missing abstract becomes `"No abstract"`.
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(io::Error::new(
                    ErrorKind::NotFound,
                    format!(
                        "News dataset not found at {}. Point news_path at a tab-separated articles file.",
                        path.display()
                    ),
                ));
            }
            Err(e) => return Err(e),
        };

        let mut articles = Vec::new();
        for line in content.lines() {
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            let id = fields.next().unwrap_or("").to_string();
            let category = fields.next().unwrap_or("").to_string();
            let subcategory = fields.next().unwrap_or("").to_string();
            let title = fields.next().unwrap_or("").to_string();
            let raw_abstract = fields.next().unwrap_or("");
            let url = fields.next().unwrap_or("").to_string();

            if id.is_empty() || title.is_empty() {
                continue;
            }

            let abstract_text = if raw_abstract.is_empty() {
                "No abstract".to_string()
            } else {
                raw_abstract.to_string()
            };

            articles.push(Article {
                id,
                category,
                subcategory,
                title,
                abstract_text,
                url,
            });
        }

        Ok(Self { articles })
    }

    /// Build a store from rows already in memory.
    pub fn from_articles(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Sample `number` random articles of a category, rendered as
    /// `Title: "<title>", ID: "<id>"` pairs joined by `". "`.
    pub fn random_by_category(&self, number: usize, category: &str) -> io::Result<String> {
        let matching: Vec<&Article> = self
            .articles
            .iter()
            .filter(|a| a.category == category)
            .collect();

        if number > matching.len() {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "Requested {} articles but category '{}' only has {}",
                    number,
                    category,
                    matching.len()
                ),
            ));
        }

        let mut rng = rand::thread_rng();
        let lines: Vec<String> = matching
            .choose_multiple(&mut rng, number)
            .map(|a| format!("Title: \"{}\", ID: \"{}\"", a.title, a.id))
            .collect();

        Ok(lines.join(". "))
    }

    /// The abstract of the article with this exact title, or
    /// `"Abstract not found."`.
    pub fn abstract_by_title(&self, title: &str) -> String {
        self.articles
            .iter()
            .find(|a| a.title == title)
            .map(|a| a.abstract_text.clone())
            .unwrap_or_else(|| "Abstract not found.".to_string())
    }

    /// The abstract of the article with this id, or `"Abstract not found."`.
    pub fn abstract_by_id(&self, id: &str) -> String {
        self.articles
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.abstract_text.clone())
            .unwrap_or_else(|| "Abstract not found.".to_string())
    }
}

fn require_str<'a>(args: &'a Map<String, Value>, name: &str) -> io::Result<&'a str> {
    args.get(name).and_then(Value::as_str).ok_or_else(|| {
        io::Error::new(
            ErrorKind::InvalidInput,
            format!("Parameter '{}' must be a string", name),
        )
    })
}

fn require_count(args: &Map<String, Value>, name: &str) -> io::Result<usize> {
    args.get(name)
        .and_then(Value::as_f64)
        .filter(|n| *n >= 0.0)
        .map(|n| n as usize)
        .ok_or_else(|| {
            io::Error::new(
                ErrorKind::InvalidInput,
                format!("Parameter '{}' must be a non-negative number", name),
            )
        })
}

/// Register the three news tools against a shared store.
pub fn register_news_tools(registry: &mut ToolRegistry, store: Arc<NewsStore>) {
    let by_category = ToolDescriptor::new(
        "get_random_news_by_category",
        "Returns the provided number of news article headlines from a given category. \
         This function requires at least one category to work.",
        vec![
            ParamSpec::required("number", "number"),
            ParamSpec::required("category", "string").with_allowed(NEWS_CATEGORIES),
        ],
    );
    let store_by_category = Arc::clone(&store);
    registry.register(by_category, move |args: &Map<String, Value>| {
        let number = require_count(args, "number")?;
        let category = require_str(args, "category")?;
        store_by_category.random_by_category(number, category)
    });

    let by_title = ToolDescriptor::new(
        "get_article_abstract_by_title",
        "Retrieves the news article's abstract with the provided title. \
         This function requires at least one title to function correctly.",
        vec![ParamSpec::required("title", "string")],
    );
    let store_by_title = Arc::clone(&store);
    registry.register(by_title, move |args: &Map<String, Value>| {
        let title = require_str(args, "title")?;
        Ok(store_by_title.abstract_by_title(title))
    });

    let by_id = ToolDescriptor::new(
        "get_article_abstract_by_id",
        "Retrieves the news article's abstract with the provided id. \
         This function requires at least one news_id to function correctly.",
        vec![ParamSpec::required("id", "string")],
    );
    registry.register(by_id, move |args: &Map<String, Value>| {
        let id = require_str(args, "id")?;
        Ok(store.abstract_by_id(id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn article(id: &str, category: &str, title: &str, abstract_text: &str) -> Article {
        Article {
            id: id.to_string(),
            category: category.to_string(),
            subcategory: String::new(),
            title: title.to_string(),
            abstract_text: abstract_text.to_string(),
            url: String::new(),
        }
    }

    fn sample_store() -> NewsStore {
        NewsStore::from_articles(vec![
            article("N1", "sports", "Raptors win", "A close game."),
            article("N2", "sports", "Cup final recap", "Extra time drama."),
            article("N3", "travel", "Hidden beaches", "Quiet coastlines."),
        ])
    }

    #[test]
    fn test_random_by_category_format() {
        let store = NewsStore::from_articles(vec![article("N1", "sports", "Raptors win", "x")]);
        let result = store.random_by_category(1, "sports").unwrap();
        assert_eq!(result, "Title: \"Raptors win\", ID: \"N1\"");
    }

    #[test]
    fn test_random_by_category_joins_with_period() {
        let store = sample_store();
        let result = store.random_by_category(2, "sports").unwrap();
        assert!(result.contains("\". Title: \""));
        assert_eq!(result.matches("Title: ").count(), 2);
    }

    #[test]
    fn test_random_by_category_rejects_oversized_request() {
        let store = sample_store();
        assert!(store.random_by_category(5, "sports").is_err());
        assert!(store.random_by_category(1, "weather").is_err());
    }

    #[test]
    fn test_abstract_lookups() {
        let store = sample_store();
        assert_eq!(store.abstract_by_title("Raptors win"), "A close game.");
        assert_eq!(store.abstract_by_title("No such title"), "Abstract not found.");
        assert_eq!(store.abstract_by_id("N3"), "Quiet coastlines.");
        assert_eq!(store.abstract_by_id("N9"), "Abstract not found.");
    }

    #[test]
    fn test_load_tsv_fills_missing_abstract() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "N1\tsports\tbasketball\tRaptors win\tA close game.\thttps://example.com/n1").unwrap();
        writeln!(file, "N2\ttravel\tbeaches\tHidden beaches\t\thttps://example.com/n2").unwrap();
        writeln!(file, "\tbroken\trow").unwrap();

        let store = NewsStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.abstract_by_id("N2"), "No abstract");
        assert_eq!(store.abstract_by_title("Raptors win"), "A close game.");
    }

    #[test]
    fn test_load_missing_file_is_explained() {
        let err = NewsStore::load(Path::new("/nonexistent/news.tsv")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("news_path"));
    }

    #[test]
    fn test_registered_tools_dispatch() {
        let mut registry = ToolRegistry::new();
        register_news_tools(&mut registry, Arc::new(sample_store()));
        assert_eq!(registry.len(), 3);

        let entry = registry.find("get_article_abstract_by_title").unwrap();
        let mut args = Map::new();
        args.insert("title".to_string(), json!("Hidden beaches"));
        assert_eq!(entry.invoke(&args).unwrap(), "Quiet coastlines.");

        let entry = registry.find("get_random_news_by_category").unwrap();
        let mut args = Map::new();
        args.insert("number".to_string(), json!(1));
        args.insert("category".to_string(), json!("travel"));
        assert_eq!(
            entry.invoke(&args).unwrap(),
            "Title: \"Hidden beaches\", ID: \"N3\""
        );
    }

    #[test]
    fn test_mistyped_number_is_invocation_failure() {
        let mut registry = ToolRegistry::new();
        register_news_tools(&mut registry, Arc::new(sample_store()));

        let entry = registry.find("get_random_news_by_category").unwrap();
        let mut args = Map::new();
        args.insert("number".to_string(), json!("three"));
        args.insert("category".to_string(), json!("sports"));
        let err = entry.invoke(&args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}

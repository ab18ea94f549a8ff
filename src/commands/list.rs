//! List changelog entries

use anyhow::Result;

use crate::changelog::PostStore;

/// Print the posts of a store, either as a table or as JSON
pub fn run(store: &PostStore, json: bool) -> Result<()> {
    if json {
        println!("{}", store.to_json()?);
        return Ok(());
    }

    println!("Posts ({}):", store.len());
    for line in summary_lines(store) {
        println!("  {}", line);
    }

    Ok(())
}

fn summary_lines(store: &PostStore) -> Vec<String> {
    store
        .posts()
        .iter()
        .map(|post| {
            let date = if post.date.is_empty() {
                "undated"
            } else {
                post.date.as_str()
            };
            format!("{} - {} [{}]", post.version, date, post.description)
        })
        .collect()
}

//! Index a few documents, search, and page through results.

use invidx::{Engine, EngineOptions, MemoryStore, SearchOptions, SearchQuery};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::new(MemoryStore::new(), EngineOptions::default());

    engine.index("the quick brown fox jumps over the lazy dog", "doc1", &[])?;
    engine.index("the fox den is under the old oak", "doc2", &[])?;
    engine.index("a turtle sleeps in the sun", "doc3", &[])?;

    let options = SearchOptions::default();
    let results = engine.search("fox", &[], &options)?;
    println!("'fox' matched {} documents: {:?}", results.ids.len(), results.ids);

    for id in &results.ids {
        let matches = &results.matches[id];
        println!("  {}: collective weight {:.3}", id, matches.collective_weight);
    }

    // Any page may be resumed from its token until the token's TTL passes.
    let next = engine.search(SearchQuery::resumed("fox", results.token), &[], &options)?;
    println!("next page: {:?}", next.ids);

    let stats = engine.statistics();
    println!(
        "indexed {} documents, mean tokens per document {:.1}",
        stats.n, stats.mean
    );

    Ok(())
}

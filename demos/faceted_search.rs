//! Facet-scoped indexing and search.

use invidx::{Engine, EngineOptions, MemoryStore, SearchOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::new(MemoryStore::new(), EngineOptions::default());

    engine.index("the quick fox", "fox", &["animals"])?;
    engine.index("a fox glove in bloom", "foxglove", &["plants"])?;
    engine.index("foxtrot for beginners", "foxtrot", &["dances"])?;

    let options = SearchOptions::default();

    for facet in ["animals", "plants", "dances"] {
        let results = engine.search("fox", &[facet], &options)?;
        println!("'fox' in {}: {:?}", facet, results.ids);
    }

    // No facet filter: the facet-agnostic key family sees everything.
    let results = engine.search("fox", &[], &options)?;
    println!("'fox' anywhere: {:?}", results.ids);

    Ok(())
}

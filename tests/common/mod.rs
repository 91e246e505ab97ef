use corpex::{Feed, MemoryStore, Post};

/// Categories present in the basic fixture store, in alphabetical order.
pub const CATEGORIES: [&str; 3] = ["books", "food", "politics"];

pub fn feed(id: &str, title: &str, link: &str, category: &str) -> Feed {
    Feed {
        id: id.to_string(),
        title: title.to_string(),
        link: link.to_string(),
        category: category.to_string(),
        active: true,
    }
}

pub fn post(id: &str, feed_id: &str, title: &str, url: &str, content: &str) -> Post {
    Post {
        id: id.to_string(),
        feed_id: feed_id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        content: content.to_string(),
        created_utc: Some(1_136_073_600),
    }
}

/// Tiny deterministic store: one feed and one post in each of
/// books / food / politics. Insertion order is books, food, politics, so
/// streams yield the books post first.
pub fn make_store_basic() -> MemoryStore {
    let mut store = MemoryStore::new();

    store.add_feed(feed(
        "f-books",
        "The Rumpus",
        "http://therumpus.net/feed/",
        "books",
    ));
    store.add_post(post(
        "p-books",
        "f-books",
        "My Awesome Post",
        "http://example.com/books.html",
        "<p>books</p>",
    ));

    store.add_feed(feed(
        "f-food",
        "I Love Food",
        "http://foodisthebest.com/atom",
        "food",
    ));
    store.add_post(post(
        "p-food",
        "f-food",
        "Hamburgers are Good",
        "http://example.com/mmmmm.html",
        "<p>ground meat</p>",
    ));

    store.add_feed(feed(
        "f-politics",
        "The Politics Site",
        "http://politicsrock.net/feed/",
        "politics",
    ));
    store.add_post(post(
        "p-politics",
        "f-politics",
        "My Awesome Political Post",
        "http://example.com/politics.html",
        "<p>political parties</p>",
    ));

    store
}

//! Previous/next linking over an ordered collection.

use crate::models::Paginated;

/// Attach `prev_item`/`next_item` to every element of an already ordered
/// collection. The first element gets no `prev_item`, the last no
/// `next_item`. Re-running on linked output produces the same links.
pub fn link_sequence<T: Paginated>(items: Vec<T>) -> Vec<T> {
    let refs: Vec<_> = items.iter().map(|i| i.document().paginator_ref()).collect();

    items
        .into_iter()
        .enumerate()
        .map(|(idx, mut item)| {
            let doc = item.document_mut();
            doc.prev_item = idx.checked_sub(1).map(|p| refs[p].clone());
            doc.next_item = refs.get(idx + 1).cloned();
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Document, PaginatorRef, ReadingTime};
    use std::path::PathBuf;

    fn doc(id: &str) -> Document {
        Document {
            id: id.into(),
            title: id.to_uppercase(),
            description: String::new(),
            permalink: format!("/releases/{id}"),
            reading_time: ReadingTime::from_words(0),
            sort_key: None,
            series_position: None,
            source: format!("@site/releases/{id}.md"),
            source_path: format!("releases/{id}.md"),
            truncated: false,
            tags: vec![],
            prev_item: None,
            next_item: None,
            file_path: PathBuf::from(format!("/site/releases/{id}.md")),
        }
    }

    #[test]
    fn test_links_neighbours() {
        let linked = link_sequence(vec![doc("a"), doc("b"), doc("c")]);

        assert_eq!(linked[0].prev_item, None);
        assert_eq!(
            linked[0].next_item,
            Some(PaginatorRef {
                title: "B".into(),
                permalink: "/releases/b".into()
            })
        );
        assert_eq!(linked[1].prev_item.as_ref().unwrap().permalink, "/releases/a");
        assert_eq!(linked[1].next_item.as_ref().unwrap().permalink, "/releases/c");
        assert_eq!(linked[2].prev_item.as_ref().unwrap().permalink, "/releases/b");
        assert_eq!(linked[2].next_item, None);
    }

    #[test]
    fn test_neighbour_symmetry() {
        let linked = link_sequence((0..6).map(|i| doc(&format!("r{i}"))).collect());
        for pair in linked.windows(2) {
            assert_eq!(pair[1].prev_item.as_ref().unwrap().permalink, pair[0].permalink);
            assert_eq!(pair[0].next_item.as_ref().unwrap().permalink, pair[1].permalink);
        }
    }

    #[test]
    fn test_idempotent() {
        let once = link_sequence(vec![doc("a"), doc("b"), doc("c")]);
        let twice = link_sequence(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_single_and_empty() {
        let single = link_sequence(vec![doc("only")]);
        assert_eq!(single[0].prev_item, None);
        assert_eq!(single[0].next_item, None);

        assert!(link_sequence(Vec::<Document>::new()).is_empty());
    }
}

//! Lift a small author/books/reviews graph and print the row tree.

use std::sync::Arc;

use tableprintlib::{Column, Config, Fingerprinter, Key, Object, RowGroup, Value};

fn book(title: &str, ratings: &[i64]) -> Value {
    let reviews: Vec<Value> = ratings
        .iter()
        .map(|r| Value::map([(Key::sym("rating"), *r)]))
        .collect();
    Object::new("Book")
        .with_field("title", title)
        .with_field("reviews", reviews)
        .into()
}

fn print_group(group: &RowGroup, depth: usize) {
    for row in group.rows() {
        let cells: Vec<String> = row
            .cells()
            .iter()
            .map(|c| format!("{}: {}", c.key, c.value))
            .collect();
        println!("{}{}", "  ".repeat(depth), cells.join(" | "));
        for child in row.children() {
            print_group(child, depth + 1);
        }
    }
}

fn main() {
    let authors: Vec<Value> = vec![
        Object::new("Author")
            .with_field("name", "dale carnegie")
            .with_field(
                "books",
                vec![book("how to win friends", &[5, 4]), book("stop worrying", &[])],
            )
            .into(),
        Object::new("Author").with_field("name", "anonymous").into(),
    ];

    let columns = vec![
        Column::new("name"),
        Column::new("books.title"),
        Column::new("books.reviews.rating"),
        Column::new("shelf"),
    ];

    let table = Fingerprinter::new(Arc::new(Config::new()), columns)
        .lift(&authors)
        .expect("no display functions, nothing can fail");

    println!("tableprint row tree ({} rows, {} levels)", table.row_count(), table.depth());
    println!("==========================================");
    print_group(table.rows(), 0);
}

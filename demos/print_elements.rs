//! Walks containers of different types through the same erased interface.
//!
//! The containers are wrapped into [`Value`]s, and from then on the code only
//! sees values: it asks for an iterable view, walks it with cursors or the
//! iterator adapter, and prints the elements whose type it knows how to print.
//! Booleans are left out on purpose; the view still iterates them and reports
//! the size of the container.
//!
//! Run with `cargo run --example print_elements`.

use std::collections::{LinkedList, VecDeque};

use typerase::{
    Registry, Value,
    sequence::{Category, Linked, LinkedSequence, Position, Sequence},
};

fn print(value: Value<'_>) {
    if let Ok(number) = value.downcast_ref::<i32>() {
        println!("Item: {number}");
    } else if let Ok(word) = value.downcast_ref::<String>() {
        println!("Item: {word}");
    } else if let Ok(number) = value.downcast_ref::<f64>() {
        println!("Item: {number}");
    } else {
        println!("Item: <Unknown>");
    }
}

fn describe(registry: &Registry, value: Value<'_>) {
    let iterable = value.as_iterable(registry);
    println!(
        "{}: size {} (can {}reverse iterate)",
        value.type_name(),
        iterable.size(),
        if iterable.can_reverse_iterate() { "" } else { "not " }
    );
}

struct Node {
    value: f64,
    next: Option<Box<Node>>,
}

/// A singly linked list, iterable forward only.
#[derive(Default)]
struct ForwardList {
    head: Option<Box<Node>>,
}

impl ForwardList {
    fn push_front(&mut self, value: f64) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
    }
}

#[derive(Clone)]
struct ForwardListPosition<'a>(Option<&'a Node>);

impl PartialEq for ForwardListPosition<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<'a> Position<'a> for ForwardListPosition<'a> {
    type Item = f64;

    const CATEGORY: Category = Category::Forward;

    fn get(&self) -> Option<&'a f64> {
        self.0.map(|node| &node.value)
    }

    fn step_forward(&mut self) {
        self.0 = self.0.and_then(|node| node.next.as_deref());
    }
}

impl Sequence for ForwardList {
    type Item = f64;
    type Layout = Linked;
}

impl LinkedSequence for ForwardList {
    type Position<'a> = ForwardListPosition<'a>;

    fn begin(&self) -> ForwardListPosition<'_> {
        ForwardListPosition(self.head.as_deref())
    }

    fn end(&self) -> ForwardListPosition<'_> {
        ForwardListPosition(None)
    }
}

fn main() {
    let registry = Registry::global();

    // Cursor loop
    let numbers = vec![4, 7, 4, 1];
    let value = registry.wrap(&numbers);
    describe(registry, value);
    let iterable = value.as_iterable(registry);
    let end = iterable.end();
    let mut cursor = iterable.begin();
    while cursor != end {
        print(cursor.get());
        cursor.increment();
    }

    // Iterator adapter
    let words: Vec<String> = ["fee", "fih", "foh", "fum"]
        .into_iter()
        .map(String::from)
        .collect();
    let value = registry.wrap(&words);
    describe(registry, value);
    for element in &value.as_iterable(registry) {
        print(element);
    }

    // Backward walk
    let list: LinkedList<i32> = [42, 57, 47, 15].into_iter().collect();
    let value = registry.wrap(&list);
    describe(registry, value);
    let iterable = value.as_iterable(registry);
    iterable.iter().for_each(print);
    println!("Reverse:");
    let begin = iterable.begin();
    let mut cursor = iterable.end();
    while cursor != begin {
        cursor.decrement();
        print(cursor.get());
    }

    let flags: VecDeque<bool> = [true, false, true].into_iter().collect();
    let value = registry.wrap(&flags);
    describe(registry, value);
    value.as_iterable(registry).iter().for_each(print);

    let mut forward = ForwardList::default();
    forward.push_front(3.5);
    forward.push_front(9.8);
    let value = registry.wrap(&forward);
    describe(registry, value);
    value.as_iterable(registry).iter().for_each(print);

    // Scalars have no iterable view
    let scalar = 42_i32;
    match Value::new(&scalar).try_as_iterable(registry) {
        Ok(_) => println!("a scalar should not be iterable"),
        Err(error) => println!("{error}"),
    }
}

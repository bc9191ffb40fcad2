// Copyright 2025 Neil Henderson, Blue Tarp Media.

use crate::core::TypeTag;

use super::super::{Binding, BindingTable, TempId};

fn local(temp: u32, readable_name: &str) -> Binding {
    Binding { temp: TempId(temp), ty: TypeTag::Int, readable_name: readable_name.to_string(), is_global: false }
}

fn temp_of(table: &BindingTable, name: &str) -> Option<TempId> {
    table.lookup(name).map(|binding| binding.temp)
}

#[test]
fn shadowing_and_frames() {
    let mut table = BindingTable::new();
    assert_eq!(table.depth(), 0);

    table.declare("x", local(0, "x"));

    table.push_frame();
    assert_eq!(table.depth(), 1);
    assert_eq!(temp_of(&table, "x"), Some(TempId(0)));

    table.declare("x", local(1, "x$1"));
    assert_eq!(temp_of(&table, "x"), Some(TempId(1)));

    table.pop_frame();
    assert_eq!(table.depth(), 0);
    assert_eq!(temp_of(&table, "x"), Some(TempId(0)));
}

#[test]
fn rebind_updates_the_declaring_frame() {
    let mut table = BindingTable::new();
    table.declare("total", local(0, "total"));

    table.push_frame();
    table.push_frame();
    assert!(table.rebind("total", TempId(5)));
    assert!(!table.rebind("missing", TempId(6)));
    table.pop_frame();
    table.pop_frame();

    assert_eq!(temp_of(&table, "total"), Some(TempId(5)));
}

#[test]
fn rebind_updates_the_innermost_binding() {
    let mut table = BindingTable::new();
    table.declare("x", local(0, "x"));
    table.push_frame();
    table.declare("x", local(1, "x$1"));

    assert!(table.rebind("x", TempId(2)));
    table.pop_frame();

    assert_eq!(temp_of(&table, "x"), Some(TempId(0)));
}

#[test]
fn snapshot_is_unaffected_by_later_changes() {
    let mut table = BindingTable::new();
    table.declare("a", local(0, "a"));
    table.declare("b", local(1, "b"));

    let snapshot = table.snapshot();

    table.push_frame();
    assert!(table.rebind("a", TempId(7)));
    table.declare("c", local(8, "c"));
    table.pop_frame();
    assert_eq!(temp_of(&table, "a"), Some(TempId(7)));

    table.restore(snapshot);
    assert_eq!(temp_of(&table, "a"), Some(TempId(0)));
    assert_eq!(temp_of(&table, "b"), Some(TempId(1)));
    assert_eq!(temp_of(&table, "c"), None);
}

#[test]
fn declare_outermost_is_visible_from_every_frame() {
    let mut table = BindingTable::new();
    table.push_frame();
    table.push_frame();

    let global = Binding { temp: TempId(3), ty: TypeTag::Float, readable_name: "scale".to_string(), is_global: true };
    table.declare_outermost("scale", global.clone());

    assert_eq!(table.lookup("scale"), Some(&global));

    table.pop_frame();
    table.pop_frame();
    assert_eq!(table.lookup("scale"), Some(&global));
}

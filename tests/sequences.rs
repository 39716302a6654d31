use factloom::encoding::List;

fn list(elements: &[i32]) -> List<i32> {
    List::from(elements.to_vec())
}

#[test]
fn nil_is_empty_and_cons_is_not() {
    let nil: List<i32> = List::nil();
    assert!(nil.is_empty());
    assert_eq!(nil.len(), 0);
    let one = List::cons(1, &nil);
    assert!(!one.is_empty());
    assert_eq!(one.nth(0), Some(&1));
    assert_eq!(one.head(), Some(&1));
}

#[test]
fn nth_is_none_past_the_end() {
    let l = list(&[10, 20, 30]);
    assert_eq!(l.nth(2), Some(&30));
    assert_eq!(l.nth(3), None);
    assert_eq!(List::<i32>::nil().nth(0), None);
}

#[test]
fn fold_is_right_associative() {
    let l = List::from(vec!["a", "b", "c"]);
    let folded = l.fold(String::from("acc"), |e, acc| format!("f({},{})", e, acc));
    assert_eq!(folded, "f(a,f(b,f(c,acc)))");
}

#[test]
fn map_and_append_keep_order() {
    let l = list(&[1, 2, 3]);
    assert_eq!(l.map(|x| x * 10).to_vec(), vec![10, 20, 30]);
    assert_eq!(l.append(&list(&[4, 5])).to_vec(), vec![1, 2, 3, 4, 5]);
    assert_eq!(List::nil().append(&l), l);
}

#[test]
fn append_is_associative() {
    let (a, b, c) = (list(&[1, 2]), list(&[3]), list(&[4, 5, 6]));
    assert_eq!(a.append(&b).append(&c), a.append(&b.append(&c)));
}

#[test]
fn cons_and_append_do_not_touch_their_operands() {
    let tail = list(&[2, 3]);
    let extended = List::cons(1, &tail);
    let appended = tail.append(&list(&[4]));
    assert_eq!(tail.to_vec(), vec![2, 3]);
    assert_eq!(extended.to_vec(), vec![1, 2, 3]);
    assert_eq!(appended.to_vec(), vec![2, 3, 4]);
}

#[test]
fn reorder_swaps_and_marks_missing_positions() {
    let l = List::from(vec!["Alice", "Bob"]);
    let swapped = l.reorder(&List::from(vec![1, 0]));
    assert_eq!(swapped.to_vec(), vec![Some("Bob"), Some("Alice")]);
    let overrun = l.reorder(&List::from(vec![0, 5]));
    assert_eq!(overrun.to_vec(), vec![Some("Alice"), None]);
}

#[test]
fn long_lists_drop_without_overflow() {
    let long: List<u32> = (0..200_000).collect();
    assert_eq!(long.len(), 200_000);
    drop(long);
}

#[test]
fn debug_formatting() {
    assert_eq!(format!("{:?}", list(&[1, 2, 3])), "[1, 2, 3]");
    assert_eq!(format!("{:?}", List::<i32>::nil()), "[]");
    let long: List<u32> = (0..200_000).collect();
    let formatted = format!("{:?}", long);
    assert!(formatted.starts_with("[0, 1, 2"));
    assert!(formatted.ends_with("199999]"), "every element is formatted");
}

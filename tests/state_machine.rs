use std::thread;

use factloom::construct::FactSymbol;
use factloom::datatype::Time;
use factloom::event::Event;
use factloom::machine::{StateMachine, Transition, run_machine};

fn event(verb: &str, tick: u64) -> Event {
    Event::at(FactSymbol::new(verb, vec!["counter".into()]), Time::tick(tick))
}

fn counter() -> StateMachine<i64, Event> {
    StateMachine::new(
        Transition::unguarded(|count: &i64, event: &Event| {
            if event.fact().has_verb("inc") {
                count + 1
            } else if event.fact().has_verb("dec") {
                count - 1
            } else {
                *count
            }
        }),
        0,
    )
}

#[test]
fn counter_over_events() {
    let events = vec![event("inc", 1), event("inc", 2), event("dec", 3)];
    assert_eq!(run_machine(&counter(), &events), 1, "two increments and a decrement");
}

#[test]
fn empty_stream_gives_initial_state() {
    let events: Vec<Event> = Vec::new();
    assert_eq!(counter().run(&events), 0);
}

#[test]
fn rejected_inputs_leave_the_state_alone() {
    let bounded = StateMachine::new(
        Transition::new(|count: &u32, _: &u32| *count < 3, |count: &u32, step: &u32| count + step),
        0u32,
    );
    assert_eq!(bounded.run(&[1, 1, 1, 1, 1]), 3);
    assert_eq!(bounded.trace(&[2, 2, 2]), vec![0, 2, 4, 4]);
}

#[test]
fn inputs_are_folded_in_stream_order() {
    let machine = StateMachine::new(
        Transition::unguarded(|seen: &String, c: &char| format!("{}{}", seen, c)),
        String::new(),
    );
    assert_eq!(machine.run(&['a', 'b', 'c']), "abc");
    assert_eq!(machine.run(&['c', 'b', 'a']), "cba");
}

#[test]
fn machines_are_reusable_and_shareable() {
    let machine = counter();
    let up = vec![event("inc", 1); 10];
    let down = vec![event("dec", 1); 4];
    assert_eq!(machine.run(&up), 10);
    assert_eq!(machine.run(&down), -4);
    assert_eq!(*machine.initial(), 0, "running never changes the initial state");

    let results: Vec<i64> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let machine = &machine;
                scope.spawn(move || machine.run(&vec![event("inc", 1); n]))
            })
            .collect();
        handles.into_iter().map(|h| h.join().expect("thread")).collect()
    });
    assert_eq!(results, vec![0, 1, 2, 3]);
}

#[test]
fn trace_lists_every_state() {
    let events = vec![event("inc", 1), event("inc", 2), event("dec", 3), event("noop", 4)];
    assert_eq!(counter().trace(&events), vec![0, 1, 2, 1, 1]);
}

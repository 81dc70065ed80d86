//! Whole-table validation using Validation.

use super::violations::TableViolation;
use crate::core::{Event, State};
use crate::engine::{Automaton, Branches};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<TableViolation>>;

fn check(holds: bool, violation: impl FnOnce() -> TableViolation) -> Check {
    if holds {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Branches after the first unguarded one, which can never be selected.
fn shadowed<S>(branches: &Branches<S>) -> impl Iterator<Item = &S> {
    branches
        .iter()
        .skip_while(|b| !b.guard.is_always())
        .skip(1)
        .map(|b| &b.target)
}

impl<E: Event, S: State> Automaton<E, S> {
    /// Check the tables against the declared sets, accumulating ALL
    /// violations.
    ///
    /// Registration is permissive; this is where undeclared states and
    /// events, a missing initialization, and branches hidden behind an
    /// earlier unguarded branch are reported.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<TableViolation>> {
        let mut checks: Vec<Check> = Vec::new();

        let initial = self.initial_branches();
        checks.push(check(!initial.is_empty(), || {
            TableViolation::MissingInitialization
        }));
        for state in initial.targets() {
            checks.push(check(self.states().contains(state), || {
                TableViolation::UndeclaredInitialState(state.name().to_string())
            }));
        }

        let mut entries: Vec<_> = self.table().iter().collect();
        entries.sort_by(|(a, _), (b, _)| {
            (a.first().name(), a.second().name()).cmp(&(b.first().name(), b.second().name()))
        });

        for (key, branches) in entries {
            let (event, source) = (key.first(), key.second());
            checks.push(check(self.events().contains(event), || {
                TableViolation::UndeclaredEvent {
                    event: event.name().to_string(),
                    state: source.name().to_string(),
                }
            }));
            checks.push(check(self.states().contains(source), || {
                TableViolation::UndeclaredSource {
                    event: event.name().to_string(),
                    state: source.name().to_string(),
                }
            }));
            for target in branches.targets() {
                checks.push(check(self.states().contains(target), || {
                    TableViolation::UndeclaredTarget {
                        event: event.name().to_string(),
                        from: source.name().to_string(),
                        target: target.name().to_string(),
                    }
                }));
            }
            for target in shadowed(branches) {
                checks.push(Validation::fail(TableViolation::ShadowedBranch {
                    event: event.name().to_string(),
                    state: source.name().to_string(),
                    target: target.name().to_string(),
                }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Effect, Guard};
    use crate::{event_enum, state_enum};

    state_enum! {
        enum TestState { A, B, C, Stray }
    }

    event_enum! {
        enum TestEvent { Go, Back, Unknown }
    }

    fn automaton() -> Automaton<TestEvent, TestState> {
        Automaton::new(
            [TestEvent::Go, TestEvent::Back],
            [TestState::A, TestState::B, TestState::C],
        )
        .unwrap()
    }

    #[test]
    fn well_formed_table_passes() {
        let mut machine = automaton();
        machine.register_transition(TestState::A, TestEvent::Go, TestState::B);
        machine.register_transition(TestState::B, TestEvent::Back, TestState::A);
        machine.register_initialization(TestState::A);

        assert!(machine.validate().is_success());
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let mut machine = automaton();
        machine.register_transition(TestState::Stray, TestEvent::Go, TestState::A);
        machine.register_transition(TestState::A, TestEvent::Unknown, TestState::Stray);

        match machine.validate() {
            Validation::Failure(errors) => {
                let errors: Vec<_> = errors.iter().cloned().collect();
                assert_eq!(errors.len(), 4);
                assert!(errors.contains(&TableViolation::MissingInitialization));
                assert!(errors.contains(&TableViolation::UndeclaredSource {
                    event: "Go".into(),
                    state: "Stray".into(),
                }));
                assert!(errors.contains(&TableViolation::UndeclaredEvent {
                    event: "Unknown".into(),
                    state: "A".into(),
                }));
                assert!(errors.contains(&TableViolation::UndeclaredTarget {
                    event: "Unknown".into(),
                    from: "A".into(),
                    target: "Stray".into(),
                }));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn undeclared_initial_state_is_reported() {
        let mut machine = automaton();
        machine.register_initialization(TestState::Stray);

        let result = machine.validate();
        assert!(result.is_failure());
        if let Validation::Failure(errors) = result {
            assert!(errors
                .iter()
                .any(|e| matches!(e, TableViolation::UndeclaredInitialState(_))));
        }
    }

    #[test]
    fn branches_behind_unguarded_branch_are_shadowed() {
        let mut machine = automaton();
        machine.register_guarded_transition(
            TestState::A,
            TestEvent::Go,
            TestState::B,
            Effect::NONE,
            Guard::when(|_| false),
        );
        machine.register_transition(TestState::A, TestEvent::Go, TestState::C);
        machine.register_guarded_transition(
            TestState::A,
            TestEvent::Go,
            TestState::A,
            Effect::NONE,
            Guard::when(|_| true),
        );
        machine.register_initialization(TestState::A);

        let result = machine.validate();
        assert!(result.is_failure());
        if let Validation::Failure(errors) = result {
            let errors: Vec<_> = errors.iter().cloned().collect();
            assert_eq!(
                errors,
                vec![TableViolation::ShadowedBranch {
                    event: "Go".into(),
                    state: "A".into(),
                    target: "A".into(),
                }]
            );
        }
    }
}

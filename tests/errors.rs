use std::error::Error;

use classic_sort::stable::{binary_insertion, insertion, merge};
use classic_sort::unstable::{selection, shell};
use classic_sort::{SortAlgorithm, SortError, SortResult};

#[test]
fn result_codes() {
    assert_eq!(SortResult::from(Ok(())), SortResult::Success);
    assert_eq!(
        SortResult::from(Err(SortError::AllocationFailed)),
        SortResult::AllocationFailed
    );
    assert_eq!(SortResult::InvalidLength.into_result(), Err(SortError::InvalidLength));
    assert_eq!(SortResult::Success.into_result(), Ok(()));
}

#[test]
fn errors_are_std_errors() {
    fn fails() -> Result<(), Box<dyn Error>> {
        let res: Result<(), SortError> = Err(SortError::NullPointer);
        res?;
        Ok(())
    }

    let err = fails().unwrap_err();
    assert!(err.to_string().contains("null"));
    assert_eq!(
        SortError::InvalidElementSize.to_string(),
        "Invalid element size: must be > 0"
    );
}

#[test]
fn empty_input_succeeds() {
    fn check<A: SortAlgorithm>() {
        let mut v: Vec<String> = Vec::new();
        assert_eq!(A::sort(&mut v), Ok(()), "{}", A::name());
        assert_eq!(
            A::sort_by(&mut v, |a, b| a.cmp(b), None),
            Ok(()),
            "{}",
            A::name()
        );
    }

    check::<insertion::SortImpl>();
    check::<binary_insertion::SortImpl>();
    check::<merge::SortImpl>();
    check::<selection::SortImpl>();
    check::<shell::SortImpl>();
}

#[test]
fn zero_sized_elements() {
    fn check<A: SortAlgorithm>() {
        let mut v = [(); 17];
        assert_eq!(A::sort(&mut v), Ok(()), "{}", A::name());
    }

    check::<insertion::SortImpl>();
    check::<binary_insertion::SortImpl>();
    check::<merge::SortImpl>();
    check::<selection::SortImpl>();
    check::<shell::SortImpl>();
}

#[test]
fn idempotent() {
    fn check<A: SortAlgorithm>() {
        let mut v = vec![5, 2, 8, 1, 9, 3, 2];
        A::sort(&mut v).unwrap();
        let once = v.clone();
        A::sort(&mut v).unwrap();

        assert_eq!(v, once, "{}", A::name());
        assert_eq!(v, [1, 2, 2, 3, 5, 8, 9]);
    }

    check::<insertion::SortImpl>();
    check::<binary_insertion::SortImpl>();
    check::<merge::SortImpl>();
    check::<selection::SortImpl>();
    check::<shell::SortImpl>();
}

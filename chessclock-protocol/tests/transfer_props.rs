//! Property tests for the image receive state machine

use chessclock_protocol::{ImageTransfer, LineOutcome, Phase, TransferError};
use proptest::prelude::*;

proptest! {
    #[test]
    fn any_split_of_the_body_completes(size in 1usize..4096, splits in proptest::collection::vec(1usize..512, 1..64)) {
        let mut transfer = ImageTransfer::new(4096);
        let line = format!("SIZE:{}", size);
        prop_assert_eq!(transfer.on_line(&line), Ok(LineOutcome::SizeAccepted(size)));

        for n in splits.iter().copied().cycle() {
            let window = transfer.body_window();
            prop_assert!(window.end <= size);
            if transfer.on_body(n.min(window.len())) {
                break;
            }
        }

        prop_assert_eq!(transfer.phase(), Phase::AwaitingTerminator);
        prop_assert_eq!(transfer.on_line("FRAME_END"), Ok(LineOutcome::Complete(size)));
    }

    #[test]
    fn declared_sizes_above_capacity_are_rejected(capacity in 1usize..65536, excess in 1usize..1_000_000) {
        let mut transfer = ImageTransfer::new(capacity);
        let declared = capacity + excess;
        let line = format!("SIZE:{}", declared);
        prop_assert_eq!(
            transfer.on_line(&line),
            Err(TransferError::Oversize { declared, capacity })
        );
    }

    #[test]
    fn chatter_never_advances_past_size(line in "[a-z0-9 :._-]{0,40}") {
        let mut transfer = ImageTransfer::new(1024);
        prop_assert_eq!(transfer.on_line(line.trim()), Ok(LineOutcome::Ignored));
        prop_assert_eq!(transfer.phase(), Phase::AwaitingSize);
    }
}

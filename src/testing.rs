pub mod segmenter_contract;

// Wed Oct 14 2026 - Alex

use memscan::pattern::PatternBuilder;
use memscan::{Config, MemoryScanner, Pid, ProcessHandle, ScanOptions};
use std::hint::black_box;

#[test]
fn test_scan_own_memory() {
    // heap buffer with a marker no other mapping should contain
    let mut marker = b"memscan-self-test-".to_vec();
    marker.extend_from_slice(&0x5c45_41f0u32.to_le_bytes());
    marker.extend_from_slice(b"-end");
    let buffer = black_box(marker.clone());
    let address = buffer.as_ptr() as u64;

    let config = Config::default().with_threads(4);
    let scanner = MemoryScanner::new(&config).unwrap();
    let handle = ProcessHandle::from_pid(std::process::id() as Pid, &config);

    let region = handle.region_containing(address).unwrap().expect("heap buffer is mapped");
    assert!(region.permissions().starts_with("rw"));
    assert!(handle.is_within_mapped_region(address).unwrap());

    let only_buffer = ScanOptions::new().with_filter(move |r| r.contains(address));
    let found = scanner.scan_bytes(&handle, &buffer, &only_buffer).unwrap();
    assert!(found.contains(&address));

    let pattern = PatternBuilder::new()
        .bytes(b"memscan-self-test-")
        .lu32(0x5c45_41f0)
        .unwrap()
        .wildcards(4)
        .build()
        .unwrap();
    let found = scanner.scan_pattern(&handle, &pattern, &only_buffer).unwrap();
    assert!(found.contains(&address));

    assert_eq!(handle.read(address, buffer.len()).unwrap(), buffer);
    black_box(&marker);
    scanner.close();
}

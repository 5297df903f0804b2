//! Default-init decorator behavior under a container-like workflow

mod common;

use common::leak_counting;
use pooled_alloc::{DefaultInit, MemoryResource, PoolAdapter, Rebind, ResourceHandle};

#[test]
fn growing_a_buffer_without_value_initialization() {
    let resource = leak_counting("di-grow");
    let adapter: DefaultInit<PoolAdapter<u32>> =
        DefaultInit::new(PoolAdapter::new(ResourceHandle::new(resource)));

    const LEN: usize = 64;
    unsafe {
        let ptr = adapter.allocate(LEN).expect("allocation failed");

        // Poison the whole buffer, then "grow" it the way a container
        // would: default-construct every element before filling.
        ptr.as_ptr().cast::<u8>().write_bytes(0x5C, LEN * size_of::<u32>());
        for i in 0..LEN {
            adapter.construct_default(ptr.add(i));
        }

        // No zeroing happened: the poison is intact.
        let bytes =
            std::slice::from_raw_parts(ptr.as_ptr().cast::<u8>(), LEN * size_of::<u32>());
        assert!(bytes.iter().all(|&b| b == 0x5C));

        // Now fill with explicit values, which must be honored exactly.
        for i in 0..LEN {
            adapter.construct(ptr.add(i), i as u32);
        }
        for i in 0..LEN {
            assert_eq!(*ptr.as_ptr().add(i), i as u32);
        }

        adapter.deallocate(ptr, LEN);
    }
    assert_eq!(resource.current_size(), 0);
}

#[test]
fn undecorated_adapter_value_initializes_the_same_element() {
    let resource = leak_counting("di-baseline");
    let base: PoolAdapter<u32> = PoolAdapter::new(ResourceHandle::new(resource));
    let decorated = DefaultInit::new(base);

    unsafe {
        let ptr = decorated.allocate(1).expect("allocation failed");
        ptr.as_ptr().cast::<u8>().write_bytes(0xEE, size_of::<u32>());

        base.construct_default(ptr);
        assert_eq!(*ptr.as_ptr(), 0, "base adapter must value-initialize");

        decorated.deallocate(ptr, 1);
    }
}

#[test]
fn rebinding_keeps_both_the_decoration_and_the_resource() {
    let resource = leak_counting("di-rebind");
    let decorated: DefaultInit<PoolAdapter<u64>> =
        DefaultInit::new(PoolAdapter::new(ResourceHandle::new(resource)));

    let rebound: DefaultInit<PoolAdapter<u16>> = decorated.rebind();
    assert!(*rebound.base() == *decorated.base());

    unsafe {
        let ptr = rebound.allocate(2).expect("allocation failed");
        // Still the decorated behavior after rebinding.
        ptr.as_ptr().cast::<u8>().write_bytes(0x77, 2 * size_of::<u16>());
        rebound.construct_default(ptr);
        assert_eq!(*ptr.as_ptr().cast::<u8>(), 0x77);
        rebound.deallocate(ptr, 2);
    }
}

//! Memory Allocator Configuration
//!
//! The service allocates a streaming buffer or a multipart chunk for every
//! upload it hashes. mimalloc keeps those short-lived allocations cheap under
//! many concurrent requests and limits fragmentation in a long-running server.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

//! Drives the guest module through its linear-memory ABI.

use median_wasm::{decode_structured, OutputEncoding, ELEMENT_SIZE, STATUS_OK};
use std::path::Path;
use tracing::{debug, info};
use wasmtime::{Engine, Instance, Linker, Memory, Module, Store, StoreLimits, StoreLimitsBuilder};

use crate::config::HostConfig;
use crate::error::{HostError, HostResult};

const ALLOCATE: &str = "allocate";
const EXEC: &str = "exec";
const EXEC_RAW: &str = "exec_raw";
const MEMORY: &str = "memory";

/// Wasm32 offsets and sizes are 32 bits wide.
const SLOT_SIZE: u32 = 4;

struct HostState {
    limits: StoreLimits,
}

/// A compiled median module. Every call instantiates it in a fresh store, so
/// calls share no guest state.
pub struct MedianRunner {
    engine: Engine,
    module: Module,
    linker: Linker<HostState>,
    config: HostConfig,
}

/// One instantiation of the module.
struct Session {
    store: Store<HostState>,
    instance: Instance,
    memory: Memory,
}

impl MedianRunner {
    pub fn from_file(path: &Path, config: HostConfig) -> HostResult<Self> {
        let bytes = std::fs::read(path)?;
        info!("Loaded median module from {}", path.display());
        Self::from_bytes(&bytes, config)
    }

    pub fn from_bytes(bytes: &[u8], config: HostConfig) -> HostResult<Self> {
        config.validate()?;
        let engine = Engine::default();
        let module = Module::from_binary(&engine, bytes)
            .map_err(|e| HostError::Wasm(format!("Failed to compile module: {}", e)))?;
        let linker = Linker::new(&engine);
        Ok(Self {
            engine,
            module,
            linker,
            config,
        })
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Median of `sample`, using the configured output encoding.
    pub fn median(&self, sample: &[i32]) -> HostResult<f64> {
        // Wasm linear memory is little-endian.
        let bytes: Vec<u8> = sample.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.exec_bytes(&bytes)
    }

    /// Hand an arbitrary payload to the module. A non-zero status comes back
    /// as [`HostError::Status`].
    pub fn exec_bytes(&self, payload: &[u8]) -> HostResult<f64> {
        let mut session = self.instantiate()?;
        let msg_len = u32::try_from(payload.len())
            .map_err(|_| HostError::Input(format!("payload of {} bytes is too large", payload.len())))?;

        let count = payload.len().div_ceil(ELEMENT_SIZE) as u32;
        let msg_ptr = session.allocate(count)?;
        session.write(msg_ptr, payload)?;
        debug!(msg_ptr, msg_len, encoding = ?self.config.encoding, "calling guest");

        match self.config.encoding {
            OutputEncoding::Raw => session.exec_raw(msg_ptr, msg_len),
            OutputEncoding::Structured => session.exec_structured(msg_ptr, msg_len),
        }
    }

    fn instantiate(&self) -> HostResult<Session> {
        let limits = StoreLimitsBuilder::new()
            .memory_size(self.config.max_memory_bytes)
            .build();
        let mut store = Store::new(&self.engine, HostState { limits });
        store.limiter(|state| &mut state.limits);

        let instance = self
            .linker
            .instantiate(&mut store, &self.module)
            .map_err(|e| HostError::Wasm(format!("Failed to instantiate module: {}", e)))?;
        let memory = instance
            .get_memory(&mut store, MEMORY)
            .ok_or_else(|| HostError::MissingExport(MEMORY.to_string()))?;

        Ok(Session {
            store,
            instance,
            memory,
        })
    }
}

impl Session {
    fn allocate(&mut self, count: u32) -> HostResult<u32> {
        let func = self
            .instance
            .get_typed_func::<u32, u32>(&mut self.store, ALLOCATE)
            .map_err(|e| HostError::MissingExport(format!("{}: {}", ALLOCATE, e)))?;
        func.call(&mut self.store, count)
            .map_err(|e| HostError::Trap(e.to_string()))
    }

    fn exec_raw(&mut self, msg_ptr: u32, msg_len: u32) -> HostResult<f64> {
        let out = self.allocate(2)?;
        let func = self
            .instance
            .get_typed_func::<(u32, u32, u32), i32>(&mut self.store, EXEC_RAW)
            .map_err(|e| HostError::MissingExport(format!("{}: {}", EXEC_RAW, e)))?;
        let status = func
            .call(&mut self.store, (msg_ptr, msg_len, out))
            .map_err(|e| HostError::Trap(e.to_string()))?;
        check_status(status)?;

        let mut raw = [0u8; 8];
        self.read(out, &mut raw)?;
        Ok(f64::from_le_bytes(raw))
    }

    fn exec_structured(&mut self, msg_ptr: u32, msg_len: u32) -> HostResult<f64> {
        // Two adjacent slots: buffer offset, then buffer length.
        let slots = self.allocate(2)?;
        let func = self
            .instance
            .get_typed_func::<(u32, u32, u32, u32), i32>(&mut self.store, EXEC)
            .map_err(|e| HostError::MissingExport(format!("{}: {}", EXEC, e)))?;
        let status = func
            .call(&mut self.store, (msg_ptr, msg_len, slots, slots + SLOT_SIZE))
            .map_err(|e| HostError::Trap(e.to_string()))?;
        check_status(status)?;

        let out_ptr = self.read_u32(slots)?;
        let out_size = self.read_u32(slots + SLOT_SIZE)?;
        let mut json = vec![0u8; out_size as usize];
        self.read(out_ptr, &mut json)?;
        debug!(out_ptr, out_size, "read structured output");
        Ok(decode_structured(&json)?)
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> HostResult<()> {
        self.memory
            .write(&mut self.store, offset as usize, bytes)
            .map_err(|e| HostError::Memory(format!("write at {}: {}", offset, e)))
    }

    fn read(&self, offset: u32, buf: &mut [u8]) -> HostResult<()> {
        self.memory
            .read(&self.store, offset as usize, buf)
            .map_err(|e| HostError::Memory(format!("read at {}: {}", offset, e)))
    }

    fn read_u32(&self, offset: u32) -> HostResult<u32> {
        let mut word = [0u8; 4];
        self.read(offset, &mut word)?;
        Ok(u32::from_le_bytes(word))
    }
}

fn check_status(status: i32) -> HostResult<()> {
    if status == STATUS_OK {
        Ok(())
    } else {
        Err(HostError::Status(status))
    }
}

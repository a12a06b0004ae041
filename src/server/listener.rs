// Listener module
// Creates the TCP listener through socket2 so socket options are under our control

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create a `TcpListener` with `SO_REUSEADDR` and `SO_REUSEPORT` enabled.
///
/// Reuse options let the server rebind quickly after a restart, even while
/// the old port sits in TIME_WAIT.
///
/// # Arguments
///
/// * `addr` - The socket address to bind to
/// * `backlog` - Listen backlog queue size
pub fn create_listener(addr: std::net::SocketAddr, backlog: i32) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;

    // Non-blocking mode is required for tokio
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(backlog)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_listener_ephemeral_port() {
        let addr = "127.0.0.1:0".parse().unwrap();
        let listener = create_listener(addr, 128).expect("listener should bind");
        let local = listener.local_addr().expect("local addr");
        assert_ne!(local.port(), 0);
    }

    #[tokio::test]
    async fn test_create_listener_port_reuse() {
        let addr = "127.0.0.1:0".parse().unwrap();
        let first = create_listener(addr, 16).expect("first listener");
        let bound = first.local_addr().expect("local addr");
        // SO_REUSEPORT allows a second bind on the same address
        let second = create_listener(bound, 16);
        assert!(second.is_ok());
    }
}

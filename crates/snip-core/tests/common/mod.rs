pub mod snip_server;

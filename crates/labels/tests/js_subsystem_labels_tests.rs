//! JS subsystem labelling for `lib/` and `doc/api/` paths.

use labels::{resolve_labels_with_limit, LIB_SRC_LABEL};

fn resolve_unlimited(paths: &[&str]) -> Vec<String> {
    resolve_labels_with_limit(paths, None, false)
}

#[test]
fn test_lib_oddities() {
    let lib_files = [
        "lib/_debug_agent.js",
        "lib/_http_agent.js",
        "lib/_http_client.js",
        "lib/_http_common.js",
        "lib/_http_incoming.js",
        "lib/_http_outgoing.js",
        "lib/_http_server.js",
        "lib/_linklist.js",
        "lib/_stream_duplex.js",
        "lib/_stream_passthrough.js",
        "lib/_stream_readable.js",
        "lib/_stream_transform.js",
        "lib/_stream_wrap.js",
        "lib/_stream_writable.js",
        "lib/_tls_common.js",
        "lib/_tls_legacy.js",
        "lib/_tls_wrap.js",
        "lib/constants.js",
        "lib/punycode.js",          // ignored
        "lib/sys.js",               // ignored
        "lib/internal/freelist.js", // ignored
        "lib/internal/process",
        "lib/internal/readme.md", // ignored
        "lib/internal/socket_list.js",
        "lib/internal/v8_prof_polyfill.js",
        "lib/internal/v8_prof_processor.js",
    ];

    assert_eq!(
        resolve_unlimited(&lib_files),
        vec![
            "debugger",    // _debug_agent
            "http",        // _http_*
            "timers",      // linklist
            "stream",      // _stream_*
            "tls",         // _tls_*
            LIB_SRC_LABEL, // constants
            "process",     // internal/process/
            "net",         // socket_list
            "tools",       // v8_prof_*
        ]
    );
}

#[test]
fn test_lib_internals_oddities_duplicates() {
    let lib_files = [
        "lib/internal/bootstrap_node.js",
        "lib/internal/linkedlist.js",
        "lib/internal/streams",
    ];

    assert_eq!(
        resolve_labels_with_limit(&lib_files, None, true),
        vec![LIB_SRC_LABEL, "timers", "stream"]
    );
}

#[test]
fn test_lib_without_limiting() {
    let cases = [
        ("lib/_debugger.js", "debugger"),
        ("lib/assert.js", "assert"),
        ("lib/buffer.js", "buffer"),
        ("lib/child_process.js", "child_process"),
        ("lib/cluster.js", "cluster"),
        ("lib/console.js", "console"),
        ("lib/crypto.js", "crypto"),
        ("lib/dgram.js", "dgram"),
        ("lib/dns.js", "dns"),
        ("lib/domain.js", "domain"),
        ("lib/events.js", "events"),
        ("lib/fs.js", "fs"),
        ("lib/http.js", "http"),
        ("lib/https.js", "https"),
        ("lib/module.js", "module"),
        ("lib/net.js", "net"),
        ("lib/os.js", "os"),
        ("lib/path.js", "path"),
        ("lib/process.js", "process"),
        ("lib/querystring.js", "querystring"),
        ("lib/readline.js", "readline"),
        ("lib/repl.js", "repl"),
        ("lib/stream.js", "stream"),
        ("lib/string_decoder.js", "string_decoder"),
        ("lib/timers.js", "timers"),
        ("lib/tls.js", "tls"),
        ("lib/tty.js", "tty"),
        ("lib/url.js", "url"),
        ("lib/util.js", "util"),
        ("lib/v8.js", "v8"),
        ("lib/vm.js", "vm"),
        ("lib/zlib.js", "zlib"),
    ];

    let paths: Vec<&str> = cases.iter().map(|(path, _)| *path).collect();
    let expected: Vec<&str> = cases.iter().map(|(_, label)| *label).collect();

    assert_eq!(resolve_unlimited(&paths), expected);
}

#[test]
fn test_lib_internals_without_limiting() {
    let lib_files = [
        "lib/internal/child_process.js",
        "lib/internal/cluster.js",
        "lib/internal/module.js",
        "lib/internal/net.js",
        "lib/internal/process.js",
        "lib/internal/readline.js",
        "lib/internal/repl.js",
        "lib/internal/util.js",
    ];

    assert_eq!(
        resolve_unlimited(&lib_files),
        vec![
            "child_process",
            "cluster",
            "module",
            "net",
            "process",
            "readline",
            "repl",
            "util"
        ]
    );
}

#[test]
fn test_lib_internal_subdirectories() {
    let labels = resolve_unlimited(&[
        "lib/internal/cluster/master.js",
        "lib/internal/process/next_tick.js",
    ]);
    assert_eq!(labels, vec!["cluster", "process"]);
}

#[test]
fn test_worker_threads() {
    assert_eq!(resolve_unlimited(&["lib/worker_threads.js"]), vec!["worker"]);
}

#[test]
fn test_single_api_doc_adds_subsystem() {
    assert_eq!(resolve_unlimited(&["doc/api/fs.md"]), vec!["doc", "fs"]);
}

#[test]
fn test_multiple_api_docs_only_doc() {
    let labels = resolve_unlimited(&["doc/api/fs.md", "doc/api/stream.md"]);
    assert_eq!(labels, vec!["doc"]);
}

#[test]
fn test_modules_doc_is_module() {
    assert_eq!(resolve_unlimited(&["doc/api/modules.md"]), vec!["doc", "module"]);
}

#[test]
fn test_special_api_docs() {
    assert_eq!(resolve_unlimited(&["doc/api/esm.md"]), vec!["doc", "ES Modules"]);
    assert_eq!(resolve_unlimited(&["doc/api/n-api.md"]), vec!["doc", "n-api"]);
    assert_eq!(
        resolve_unlimited(&["doc/api/worker_threads.md"]),
        vec!["doc", "worker"]
    );
}

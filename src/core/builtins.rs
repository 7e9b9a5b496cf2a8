//! Built-in snapshot of the Java platform class hierarchy
//!
//! Covers the throwable hierarchy in depth (checked and unchecked exceptions,
//! errors) plus a handful of core classes and interfaces. User registry files
//! extend or override these entries.

use super::registry::TypeDescriptor;
use once_cell::sync::Lazy;

/// The universal root type: every built-in class chain ends here.
pub const ROOT_TYPE: &str = "java.lang.Object";

/// `(class, direct superclass)` pairs
const CLASSES: &[(&str, &str)] = &[
    // Throwable
    ("java.lang.Throwable", ROOT_TYPE),
    ("java.lang.Exception", "java.lang.Throwable"),
    ("java.lang.Error", "java.lang.Throwable"),
    ("java.lang.RuntimeException", "java.lang.Exception"),

    // Checked I/O
    ("java.io.IOException", "java.lang.Exception"),
    ("java.io.FileNotFoundException", "java.io.IOException"),
    ("java.io.EOFException", "java.io.IOException"),
    ("java.io.UnsupportedEncodingException", "java.io.IOException"),
    ("java.net.MalformedURLException", "java.io.IOException"),
    ("java.net.UnknownHostException", "java.io.IOException"),
    ("java.net.SocketException", "java.io.IOException"),
    ("java.net.ConnectException", "java.net.SocketException"),
    ("java.net.SocketTimeoutException", "java.io.InterruptedIOException"),
    ("java.io.InterruptedIOException", "java.io.IOException"),
    ("java.nio.file.FileSystemException", "java.io.IOException"),
    ("java.nio.file.NoSuchFileException", "java.nio.file.FileSystemException"),
    ("java.nio.file.AccessDeniedException", "java.nio.file.FileSystemException"),

    // Other checked
    ("java.lang.ReflectiveOperationException", "java.lang.Exception"),
    ("java.lang.ClassNotFoundException", "java.lang.ReflectiveOperationException"),
    ("java.lang.NoSuchMethodException", "java.lang.ReflectiveOperationException"),
    ("java.lang.NoSuchFieldException", "java.lang.ReflectiveOperationException"),
    ("java.lang.InstantiationException", "java.lang.ReflectiveOperationException"),
    ("java.lang.IllegalAccessException", "java.lang.ReflectiveOperationException"),
    ("java.lang.InterruptedException", "java.lang.Exception"),
    ("java.lang.CloneNotSupportedException", "java.lang.Exception"),
    ("java.security.GeneralSecurityException", "java.lang.Exception"),
    ("java.security.NoSuchAlgorithmException", "java.security.GeneralSecurityException"),
    ("java.security.KeyException", "java.security.GeneralSecurityException"),
    ("java.security.InvalidKeyException", "java.security.KeyException"),
    ("javax.crypto.NoSuchPaddingException", "java.security.GeneralSecurityException"),
    ("javax.crypto.BadPaddingException", "java.security.GeneralSecurityException"),
    ("java.sql.SQLException", "java.lang.Exception"),
    ("java.text.ParseException", "java.lang.Exception"),
    ("java.util.concurrent.TimeoutException", "java.lang.Exception"),
    ("java.util.concurrent.ExecutionException", "java.lang.Exception"),
    ("java.net.URISyntaxException", "java.lang.Exception"),

    // Unchecked
    ("java.io.UncheckedIOException", "java.lang.RuntimeException"),
    ("java.lang.IllegalArgumentException", "java.lang.RuntimeException"),
    ("java.lang.NumberFormatException", "java.lang.IllegalArgumentException"),
    ("java.lang.IllegalStateException", "java.lang.RuntimeException"),
    ("java.lang.NullPointerException", "java.lang.RuntimeException"),
    ("java.lang.ArithmeticException", "java.lang.RuntimeException"),
    ("java.lang.ClassCastException", "java.lang.RuntimeException"),
    ("java.lang.IndexOutOfBoundsException", "java.lang.RuntimeException"),
    ("java.lang.ArrayIndexOutOfBoundsException", "java.lang.IndexOutOfBoundsException"),
    ("java.lang.StringIndexOutOfBoundsException", "java.lang.IndexOutOfBoundsException"),
    ("java.lang.UnsupportedOperationException", "java.lang.RuntimeException"),
    ("java.lang.SecurityException", "java.lang.RuntimeException"),
    ("java.util.NoSuchElementException", "java.lang.RuntimeException"),
    ("java.util.ConcurrentModificationException", "java.lang.RuntimeException"),

    // Errors
    ("java.lang.AssertionError", "java.lang.Error"),
    ("java.lang.LinkageError", "java.lang.Error"),
    ("java.lang.NoClassDefFoundError", "java.lang.LinkageError"),
    ("java.lang.VirtualMachineError", "java.lang.Error"),
    ("java.lang.OutOfMemoryError", "java.lang.VirtualMachineError"),
    ("java.lang.StackOverflowError", "java.lang.VirtualMachineError"),

    // Core classes
    ("java.lang.String", ROOT_TYPE),
    ("java.lang.Thread", ROOT_TYPE),
    ("java.lang.Number", ROOT_TYPE),
    ("java.lang.Integer", "java.lang.Number"),
    ("java.lang.Long", "java.lang.Number"),
    ("java.lang.Double", "java.lang.Number"),
    ("java.lang.Boolean", ROOT_TYPE),
    ("java.io.InputStream", ROOT_TYPE),
    ("java.io.FileInputStream", "java.io.InputStream"),
    ("java.io.OutputStream", ROOT_TYPE),
    ("java.io.FileOutputStream", "java.io.OutputStream"),
    ("java.util.AbstractCollection", ROOT_TYPE),
    ("java.util.AbstractList", "java.util.AbstractCollection"),
    ("java.util.ArrayList", "java.util.AbstractList"),
    ("java.util.AbstractMap", ROOT_TYPE),
    ("java.util.HashMap", "java.util.AbstractMap"),
];

const INTERFACES: &[&str] = &[
    "java.io.Serializable",
    "java.io.Closeable",
    "java.lang.AutoCloseable",
    "java.lang.Comparable",
    "java.lang.Iterable",
    "java.lang.Runnable",
    "java.util.Collection",
    "java.util.List",
    "java.util.Map",
];

static DESCRIPTORS: Lazy<Vec<TypeDescriptor>> = Lazy::new(|| {
    let mut descriptors = Vec::with_capacity(1 + CLASSES.len() + INTERFACES.len());
    descriptors.push(TypeDescriptor::root(ROOT_TYPE));
    descriptors.extend(CLASSES.iter().map(|(name, parent)| TypeDescriptor::class(*name, *parent)));
    descriptors.extend(INTERFACES.iter().map(|name| TypeDescriptor::interface(*name)));
    descriptors
});

/// All built-in descriptors, root first
pub fn descriptors() -> &'static [TypeDescriptor] {
    &DESCRIPTORS
}
